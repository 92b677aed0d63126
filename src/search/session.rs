use crate::Result;
use crate::model::Developer;
use crate::search::{SearchClient, SearchOutcome, StatusTicker};

const LOG_TARGET: &str = "   session";

/// The generic, retry-suggesting message shown for transport failures.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to fetch developers. Please try again.";

/// The message shown when a valid response matched no developers.
pub const NO_MATCHES_MESSAGE: &str = "No developers found matching your search criteria.";

/// Lifecycle states of a query session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Why the last submission failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    /// The exchange with the service never completed. The user gets the
    /// generic retry message; the detail goes to the log.
    Transport(String),

    /// The service reported an error; its message is surfaced verbatim.
    Service(String),
}

impl SearchFailure {
    /// The user-visible message for this failure.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Transport(_) => TRANSPORT_FAILURE_MESSAGE,
            Self::Service(message) => message,
        }
    }
}

/// Owns the submit → pending → settled lifecycle of search requests and
/// the result set derived from the most recent settlement.
///
/// Each submission is tagged with a monotonically increasing sequence
/// number and a settlement is applied only when it carries the newest
/// number, so a slow response from an abandoned submission can never
/// overwrite fresher data. A new submission may begin from any settled
/// state; the result set is replaced wholesale, never patched.
#[derive(Debug, Default)]
pub struct SearchSession {
    last_seq: u64,
    state: SessionState,
    developers: Vec<Developer>,
    notice: Option<&'static str>,
    failure: Option<SearchFailure>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The result set from the most recent settlement. Stays populated
    /// while a newer submission is pending.
    #[must_use]
    pub fn developers(&self) -> &[Developer] {
        &self.developers
    }

    /// The "no match" notice, when the last settlement found nothing.
    #[must_use]
    pub const fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// Why the last submission failed, when it did.
    #[must_use]
    pub const fn failure(&self) -> Option<&SearchFailure> {
        self.failure.as_ref()
    }

    /// Enter `Pending` for a new submission and return its sequence number.
    ///
    /// Any previously displayed failure is cleared immediately; the
    /// previous result set stays visible until the new response settles so
    /// a slow search does not flash an empty table.
    pub fn begin(&mut self) -> u64 {
        self.last_seq += 1;
        self.state = SessionState::Pending;
        self.notice = None;
        self.failure = None;
        self.last_seq
    }

    /// Settle the submission tagged `seq` with the outcome of its exchange.
    ///
    /// Returns `false` without touching any state when `seq` is not the
    /// newest submission.
    pub fn apply(&mut self, seq: u64, outcome: Result<SearchOutcome>) -> bool {
        if seq != self.last_seq {
            log::debug!(target: LOG_TARGET, "Ignoring stale settlement for submission {seq} (newest is {})", self.last_seq);
            return false;
        }

        match outcome {
            Ok(SearchOutcome::Results(developers)) => {
                self.developers = developers;
                self.state = SessionState::Succeeded;
            }
            Ok(SearchOutcome::NoMatches) => {
                self.developers.clear();
                self.notice = Some(NO_MATCHES_MESSAGE);
                self.state = SessionState::Succeeded;
            }
            Ok(SearchOutcome::ServiceError(message)) => {
                self.developers.clear();
                self.failure = Some(SearchFailure::Service(message));
                self.state = SessionState::Failed;
            }
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Search transport failure: {e}");
                self.developers.clear();
                self.failure = Some(SearchFailure::Transport(format!("{e}")));
                self.state = SessionState::Failed;
            }
        }

        true
    }

    /// Submit a query and drive it to settlement.
    ///
    /// The ticker rotates its cosmetic status message for as long as the
    /// exchange is in flight and is torn down the instant the session
    /// settles; there is no await point between settlement and teardown,
    /// so no tick can fire once the pending state is exited.
    pub async fn submit(&mut self, client: &SearchClient, query: &str, ticker: &StatusTicker) {
        let seq = self.begin();
        let outcome = client.search(query).await;
        let _ = self.apply(seq, outcome);
        ticker.done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohno::app_err;

    fn developer(name: &str) -> Developer {
        Developer {
            name: name.to_string(),
            ..Developer::default()
        }
    }

    #[test]
    fn test_lifecycle_idle_pending_succeeded() {
        let mut session = SearchSession::new();
        assert_eq!(session.state(), SessionState::Idle);

        let seq = session.begin();
        assert_eq!(session.state(), SessionState::Pending);

        assert!(session.apply(seq, Ok(SearchOutcome::Results(vec![developer("Sarah Chen")]))));
        assert_eq!(session.state(), SessionState::Succeeded);
        assert_eq!(session.developers().len(), 1);
        assert!(session.failure().is_none());
    }

    #[test]
    fn test_stale_settlement_is_ignored() {
        let mut session = SearchSession::new();

        let stale = session.begin();
        let newest = session.begin();

        assert!(!session.apply(stale, Ok(SearchOutcome::Results(vec![developer("Old Answer")]))));
        assert_eq!(session.state(), SessionState::Pending);
        assert!(session.developers().is_empty());

        assert!(session.apply(newest, Ok(SearchOutcome::Results(vec![developer("New Answer")]))));
        assert_eq!(session.developers()[0].name, "New Answer");
    }

    #[test]
    fn test_pending_keeps_results_and_clears_failure() {
        let mut session = SearchSession::new();

        let seq = session.begin();
        let _ = session.apply(seq, Ok(SearchOutcome::Results(vec![developer("Sarah Chen")])));

        let seq = session.begin();
        let _ = session.apply(seq, Err(app_err!("connection refused")));
        assert_eq!(session.state(), SessionState::Failed);
        assert!(session.developers().is_empty());

        // A fresh submission clears the failure but a prior result set
        // would stay visible while pending
        let seq = session.begin();
        let _ = session.apply(seq, Ok(SearchOutcome::Results(vec![developer("Sarah Chen")])));
        let _ = session.begin();
        assert_eq!(session.state(), SessionState::Pending);
        assert!(session.failure().is_none());
        assert_eq!(session.developers().len(), 1);
    }

    #[test]
    fn test_no_matches_clears_results_and_sets_notice() {
        let mut session = SearchSession::new();

        let seq = session.begin();
        let _ = session.apply(seq, Ok(SearchOutcome::Results(vec![developer("Sarah Chen")])));

        let seq = session.begin();
        let _ = session.apply(seq, Ok(SearchOutcome::NoMatches));
        assert_eq!(session.state(), SessionState::Succeeded);
        assert!(session.developers().is_empty());
        assert_eq!(session.notice(), Some(NO_MATCHES_MESSAGE));
    }

    #[test]
    fn test_failure_messages_by_kind() {
        let mut session = SearchSession::new();

        let seq = session.begin();
        let _ = session.apply(seq, Ok(SearchOutcome::ServiceError("query too vague".to_string())));
        assert_eq!(session.failure().map(SearchFailure::user_message), Some("query too vague"));

        let seq = session.begin();
        let _ = session.apply(seq, Err(app_err!("dns lookup failed")));
        assert_eq!(session.failure().map(SearchFailure::user_message), Some(TRANSPORT_FAILURE_MESSAGE));
    }
}
