use crate::model::{Developer, RepoContribution, parse_delimited};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const LOG_TARGET: &str = "    decode";

/// The reserved character packing multiple values into one scalar response
/// field. The wire format has no escaping mechanism.
pub const FIELD_DELIMITER: char = '|';

/// One element of the search response, in either of the two shapes the
/// service has historically produced.
///
/// The current shape nests a per-repository evidence array under `repo`;
/// the older flat shape carries a single repository's numbers at the top
/// level with `repo` as a plain string. Both normalize into the canonical
/// [`Developer`]; nothing downstream sees the distinction.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawRecord {
    Nested(NestedRecord),
    Flat(FlatRecord),
}

#[derive(Debug, Deserialize)]
pub struct NestedRecord {
    #[serde(default)]
    author_name: String,

    #[serde(default)]
    author_email: String,

    #[serde(default)]
    languages: String,

    #[serde(default)]
    project_type: String,

    #[serde(default)]
    reason: String,

    #[serde(default)]
    repo: Vec<RawContribution>,
}

#[derive(Debug, Deserialize)]
pub struct FlatRecord {
    #[serde(default)]
    author_name: String,

    #[serde(default)]
    author_email: String,

    #[serde(default, deserialize_with = "de_count")]
    commit_count: u64,

    #[serde(default, deserialize_with = "de_score")]
    impact_to_project: f64,

    #[serde(default, deserialize_with = "de_score")]
    technical_ability: f64,

    #[serde(default)]
    languages: String,

    #[serde(default)]
    project_type: String,

    #[serde(default)]
    repo: String,

    #[serde(default)]
    reason: String,
}

#[derive(Debug, Deserialize)]
struct RawContribution {
    #[serde(default)]
    repo: String,

    #[serde(default, deserialize_with = "de_count")]
    commit_count: u64,

    #[serde(default, deserialize_with = "de_score")]
    impact_to_project: f64,

    #[serde(default, deserialize_with = "de_score")]
    technical_ability: f64,

    #[serde(default, deserialize_with = "de_count")]
    lines_modified: u64,

    #[serde(default, deserialize_with = "de_timestamp")]
    first_commit: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "de_timestamp")]
    last_commit: Option<DateTime<Utc>>,
}

impl RawRecord {
    /// Normalize either response shape into the canonical developer entity.
    #[must_use]
    pub fn into_developer(self) -> Developer {
        match self {
            Self::Nested(record) => record.into_developer(),
            Self::Flat(record) => record.into_developer(),
        }
    }
}

impl NestedRecord {
    fn into_developer(self) -> Developer {
        Developer {
            name: self.author_name,
            emails: parse_delimited(&self.author_email, FIELD_DELIMITER),
            languages: parse_delimited(&self.languages, FIELD_DELIMITER),
            project_types: parse_delimited(&self.project_type, FIELD_DELIMITER),
            contributions: self.repo.into_iter().map(RawContribution::into_contribution).collect(),
            rank_reason: self.reason,
        }
    }
}

impl FlatRecord {
    fn into_developer(self) -> Developer {
        // The flat shape carries at most one repository's evidence; an empty
        // repo name means there is none.
        let contributions = if self.repo.is_empty() {
            Vec::new()
        } else {
            vec![RepoContribution {
                repo: self.repo,
                commit_count: self.commit_count,
                impact_score: self.impact_to_project,
                technical_ability: self.technical_ability,
                lines_modified: 0,
                first_commit_at: None,
                last_commit_at: None,
            }]
        };

        Developer {
            name: self.author_name,
            emails: parse_delimited(&self.author_email, FIELD_DELIMITER),
            languages: parse_delimited(&self.languages, FIELD_DELIMITER),
            project_types: parse_delimited(&self.project_type, FIELD_DELIMITER),
            contributions,
            rank_reason: self.reason,
        }
    }
}

impl RawContribution {
    fn into_contribution(self) -> RepoContribution {
        RepoContribution {
            repo: self.repo,
            commit_count: self.commit_count,
            impact_score: self.impact_to_project,
            technical_ability: self.technical_ability,
            lines_modified: self.lines_modified,
            first_commit_at: self.first_commit,
            last_commit_at: self.last_commit,
        }
    }
}

/// Decode the elements of a search response array, skipping elements that
/// cannot be interpreted as developer records at all.
///
/// Malformed fields inside an otherwise readable record degrade to safe
/// defaults in the field deserializers; an element that is not a record is
/// logged and dropped. Either way, one bad element never blanks the rest
/// of the result set.
#[must_use]
pub fn decode_records(items: &[Value]) -> Vec<Developer> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<RawRecord>(item.clone()) {
            Ok(record) => Some(record.into_developer()),
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping malformed search record: {e}");
                None
            }
        })
        .collect()
}

/// Accept any JSON value, yielding a non-negative count; anything that is
/// not a non-negative number degrades to 0.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "Value is checked finite and non-negative")]
fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .map_or(0, |n| if n.is_finite() && n >= 0.0 { n as u64 } else { 0 }))
}

/// Accept any JSON value, yielding a score clamped to the documented
/// `[0, 10]` domain; non-numeric input degrades to 0.
fn de_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|n| n.is_finite()).map_or(0.0, |n| n.clamp(0.0, 10.0)))
}

/// Accept an ISO-8601 timestamp with or without a UTC offset; anything
/// unparsable degrades to `None`.
fn de_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    // The service has historically emitted offset-less timestamps
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|ts| ts.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_record_normalizes() {
        let items = vec![json!({
            "author_name": "Sarah Chen",
            "author_email": "sarah@example.com|s.chen@example.org",
            "languages": "rust|python",
            "project_type": "data_processing|dev_ops",
            "reason": "Strong systems background",
            "repo": [{
                "repo": "acme/pipeline",
                "commit_count": 42,
                "impact_to_project": 7.5,
                "technical_ability": 8.25,
                "lines_modified": 1200,
                "first_commit": "2023-04-01T12:00:00Z",
                "last_commit": "2024-05-06T08:30:00Z"
            }]
        })];

        let developers = decode_records(&items);
        assert_eq!(developers.len(), 1);

        let dev = &developers[0];
        assert_eq!(dev.name, "Sarah Chen");
        assert_eq!(dev.emails, vec!["sarah@example.com", "s.chen@example.org"]);
        assert_eq!(dev.primary_email(), Some("sarah@example.com"));
        assert_eq!(dev.project_types, vec!["data_processing", "dev_ops"]);
        assert_eq!(dev.rank_reason, "Strong systems background");
        assert_eq!(dev.contributions.len(), 1);

        let contribution = &dev.contributions[0];
        assert_eq!(contribution.repo, "acme/pipeline");
        assert_eq!(contribution.commit_count, 42);
        assert!((contribution.technical_ability - 8.25).abs() < f64::EPSILON);
        assert!(contribution.first_commit_at.is_some());
        assert!(contribution.last_commit_at.is_some());
    }

    #[test]
    fn test_flat_record_normalizes_to_single_contribution() {
        let items = vec![json!({
            "author_name": "Alex Rodriguez",
            "author_email": "alex@example.com",
            "commit_count": 17,
            "impact_to_project": 6.0,
            "technical_ability": 7.0,
            "languages": "typescript",
            "project_type": "frontend",
            "repo": "acme/webapp",
            "reason": ""
        })];

        let developers = decode_records(&items);
        assert_eq!(developers.len(), 1);

        let dev = &developers[0];
        assert_eq!(dev.contributions.len(), 1);
        assert_eq!(dev.contributions[0].repo, "acme/webapp");
        assert_eq!(dev.contributions[0].commit_count, 17);
        assert!(dev.contributions[0].first_commit_at.is_none());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let items = vec![json!({ "author_name": "Minimal" })];

        let developers = decode_records(&items);
        assert_eq!(developers.len(), 1);

        let dev = &developers[0];
        assert_eq!(dev.rank_reason, "");
        assert!(dev.contributions.is_empty());
        // An absent delimited field still yields one (empty) value
        assert_eq!(dev.languages, vec![String::new()]);
    }

    #[test]
    fn test_malformed_element_is_skipped_not_fatal() {
        let items = vec![
            json!("not a record"),
            json!({ "author_name": "Still Here", "repo": [] }),
            json!(42),
        ];

        let developers = decode_records(&items);
        assert_eq!(developers.len(), 1);
        assert_eq!(developers[0].name, "Still Here");
    }

    #[test]
    fn test_malformed_fields_degrade_locally() {
        let items = vec![json!({
            "author_name": "Messy Record",
            "repo": [{
                "repo": "acme/mess",
                "commit_count": -5,
                "impact_to_project": "high",
                "technical_ability": 14.0,
                "lines_modified": 10,
                "first_commit": "not a date",
                "last_commit": "2024-05-06T08:30:00"
            }]
        })];

        let developers = decode_records(&items);
        assert_eq!(developers.len(), 1);

        let contribution = &developers[0].contributions[0];
        assert_eq!(contribution.commit_count, 0);
        assert!((contribution.impact_score - 0.0).abs() < f64::EPSILON);
        assert!((contribution.technical_ability - 10.0).abs() < f64::EPSILON);
        assert!(contribution.first_commit_at.is_none());
        // Offset-less timestamps are accepted
        assert!(contribution.last_commit_at.is_some());
    }
}
