use chrono::{DateTime, Utc};

/// Contribution evidence for one developer in one repository.
///
/// Constructed wholesale from one element of the search response's per-repo
/// array and owned exclusively by the developer that contains it.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoContribution {
    /// Repository in `owner/repo` form.
    pub repo: String,

    pub commit_count: u64,

    /// Impact on the containing project, in `[0, 10]`.
    pub impact_score: f64,

    /// Technical ability evidenced in this repository, in `[0, 10]`.
    pub technical_ability: f64,

    pub lines_modified: u64,

    /// First observed commit; `None` when the source timestamp was absent
    /// or unparsable.
    pub first_commit_at: Option<DateTime<Utc>>,

    /// Last observed commit; the source guarantees it is not before
    /// `first_commit_at`.
    pub last_commit_at: Option<DateTime<Utc>>,
}

/// One ranked candidate, normalized from either historical response shape.
///
/// A result set is constructed wholesale per search response and replaced
/// wholesale by the next submission; nothing is patched in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Developer {
    pub name: String,

    /// Email addresses in source order; the first is the primary one.
    pub emails: Vec<String>,

    /// Raw language tokens, order-preserving, duplicates permitted.
    pub languages: Vec<String>,

    /// Raw project-type tokens, order-preserving, duplicates permitted.
    pub project_types: Vec<String>,

    /// Per-repository evidence in the order received (most relevant
    /// first); never re-sorted.
    pub contributions: Vec<RepoContribution>,

    /// Free-text ranking rationale; may be empty.
    pub rank_reason: String,
}

impl Developer {
    /// The primary (first) email address, if any was supplied.
    #[must_use]
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }
}
