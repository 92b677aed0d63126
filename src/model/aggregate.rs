use super::RepoContribution;
use strum::{Display, EnumIter};

/// Number of ability tiers.
pub const NUM_ABILITY_TIERS: usize = 4;

/// Scalar summary metrics reduced from a developer's contribution records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionSummary {
    pub total_commits: u64,
    pub mean_technical_ability: f64,
}

/// Reduce per-repository contribution records into summary metrics.
///
/// The mean is unweighted across repositories; whether commit volume or
/// recency should weigh in is an open call, recorded in DESIGN.md. An
/// empty slice yields zeros: the ability bar downstream derives a
/// percentage width from the mean and must never see a non-finite value.
#[must_use]
pub fn aggregate(contributions: &[RepoContribution]) -> ContributionSummary {
    if contributions.is_empty() {
        return ContributionSummary {
            total_commits: 0,
            mean_technical_ability: 0.0,
        };
    }

    let total_commits = contributions.iter().map(|c| c.commit_count).sum();
    let ability_sum: f64 = contributions.iter().map(|c| c.technical_ability).sum();

    #[expect(clippy::cast_precision_loss, reason = "contribution counts are far below f64 precision limits")]
    let mean_technical_ability = ability_sum / contributions.len() as f64;

    ContributionSummary {
        total_commits,
        mean_technical_ability,
    }
}

/// One of four ordered quality bands derived from a mean ability score,
/// used to pick a display treatment.
///
/// Variants are declared lowest to highest so the derived ordering matches
/// band quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display)]
pub enum AbilityTier {
    Baseline,
    Competent,
    Strong,
    Exceptional,
}

impl AbilityTier {
    /// Select the tier for a score in `[0, 10]`.
    ///
    /// Thresholds are inclusive on the lower bound of each tier: `>= 8` is
    /// [`Self::Exceptional`], `>= 6` [`Self::Strong`], `>= 4`
    /// [`Self::Competent`], anything lower [`Self::Baseline`].
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::Exceptional
        } else if score >= 6.0 {
            Self::Strong
        } else if score >= 4.0 {
            Self::Competent
        } else {
            Self::Baseline
        }
    }

    /// Index into the configured tier color array (baseline first).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Baseline => 0,
            Self::Competent => 1,
            Self::Strong => 2,
            Self::Exceptional => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution(commit_count: u64, technical_ability: f64) -> RepoContribution {
        RepoContribution {
            repo: "acme/widgets".to_string(),
            commit_count,
            impact_score: 5.0,
            technical_ability,
            lines_modified: 100,
            first_commit_at: None,
            last_commit_at: None,
        }
    }

    #[test]
    fn test_empty_contributions_aggregate_to_zero() {
        let summary = aggregate(&[]);
        assert_eq!(summary.total_commits, 0);
        assert!((summary.mean_technical_ability - 0.0).abs() < f64::EPSILON);
        assert!(summary.mean_technical_ability.is_finite());
    }

    #[test]
    fn test_aggregate_sums_commits_and_averages_ability() {
        let summary = aggregate(&[contribution(5, 8.0), contribution(3, 4.0)]);
        assert_eq!(summary.total_commits, 8);
        assert!((summary.mean_technical_ability - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tier_thresholds_inclusive_on_lower_bound() {
        assert_eq!(AbilityTier::from_score(8.0), AbilityTier::Exceptional);
        assert_eq!(AbilityTier::from_score(10.0), AbilityTier::Exceptional);
        assert_eq!(AbilityTier::from_score(7.999), AbilityTier::Strong);
        assert_eq!(AbilityTier::from_score(6.0), AbilityTier::Strong);
        assert_eq!(AbilityTier::from_score(5.999), AbilityTier::Competent);
        assert_eq!(AbilityTier::from_score(4.0), AbilityTier::Competent);
        assert_eq!(AbilityTier::from_score(3.999), AbilityTier::Baseline);
        assert_eq!(AbilityTier::from_score(0.0), AbilityTier::Baseline);
    }

    #[test]
    fn test_exactly_four_tiers_exist() {
        use strum::IntoEnumIterator;
        assert_eq!(AbilityTier::iter().count(), NUM_ABILITY_TIERS);
    }

    #[test]
    fn test_tier_is_monotonic_over_score_domain() {
        let mut previous = AbilityTier::from_score(0.0);
        let mut score = 0.0;
        while score <= 10.0 {
            let tier = AbilityTier::from_score(score);
            assert!(tier >= previous, "tier regressed at score {score}");
            previous = tier;
            score += 0.05;
        }
    }
}
