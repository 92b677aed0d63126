use crate::Result;
use crate::model::Developer;
use crate::search::response::decode_records;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use serde_json::Value;
use url::Url;

const LOG_TARGET: &str = "    search";

/// Outcome of a successfully transported search exchange.
///
/// Transport-level failures (the request could not be sent, timed out, or
/// came back with a non-2xx status) surface as errors from
/// [`SearchClient::search`] instead; these variants are the service's
/// three meaningful answers.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The service returned at least one ranked developer.
    Results(Vec<Developer>),

    /// The service answered with an empty result set: a valid "no match"
    /// answer, not an error.
    NoMatches,

    /// The service reported an application-level error in a 2xx payload;
    /// the message is surfaced to the user verbatim.
    ServiceError(String),
}

/// HTTP client for the developer-search service.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl SearchClient {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL or the
    /// HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).into_app_err_with(|| format!("invalid search service base URL '{base_url}'"))?;
        let endpoint = base
            .join("api/search")
            .into_app_err_with(|| format!("building search endpoint from '{base_url}'"))?;

        let client = reqwest::Client::builder()
            .user_agent("dev-scout")
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self { client, endpoint })
    }

    /// Submit a free-text query and classify the service's answer.
    ///
    /// The query is carried as the sole `q` parameter, URL-encoded; there
    /// is no pagination and no auth in the service contract.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures only; every answer the
    /// service actually produced becomes a [`SearchOutcome`].
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        log::info!(target: LOG_TARGET, "Querying {} for '{query}'", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", query)])
            .send()
            .await
            .into_app_err("unable to reach the search service")?;

        let status = response.status();
        if !status.is_success() {
            bail!("search service returned HTTP {status}");
        }

        let body: Value = response.json().await.into_app_err("reading search service response")?;
        Ok(classify_payload(&body))
    }
}

/// Classify a 2xx response payload into one of the three service answers.
///
/// An object payload carrying an `error` string is an application-level
/// failure surfaced verbatim; an empty array is the "no match" answer; any
/// other array is a result set. A payload that is none of these counts as
/// an application-level failure too, since the transport itself succeeded.
#[must_use]
pub fn classify_payload(body: &Value) -> SearchOutcome {
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return SearchOutcome::ServiceError(message.to_string());
    }

    match body.as_array() {
        Some(items) if items.is_empty() => SearchOutcome::NoMatches,
        Some(items) => {
            let developers = decode_records(items);
            if developers.is_empty() {
                SearchOutcome::NoMatches
            } else {
                SearchOutcome::Results(developers)
            }
        }
        None => SearchOutcome::ServiceError("search service returned an unexpected response shape".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_array_is_no_matches_not_an_error() {
        assert_eq!(classify_payload(&json!([])), SearchOutcome::NoMatches);
    }

    #[test]
    fn test_error_payload_is_surfaced_verbatim() {
        let outcome = classify_payload(&json!({ "error": "query too vague" }));
        assert_eq!(outcome, SearchOutcome::ServiceError("query too vague".to_string()));
    }

    #[test]
    fn test_record_array_yields_results() {
        let outcome = classify_payload(&json!([{ "author_name": "Sarah Chen" }]));
        let SearchOutcome::Results(developers) = outcome else {
            panic!("expected results");
        };
        assert_eq!(developers.len(), 1);
    }

    #[test]
    fn test_unexpected_shape_is_a_service_error() {
        assert!(matches!(classify_payload(&json!("nonsense")), SearchOutcome::ServiceError(_)));
        assert!(matches!(classify_payload(&json!({ "data": [] })), SearchOutcome::ServiceError(_)));
    }
}
