//! Search request lifecycle and response normalization
//!
//! This module owns everything between the user's free-text query and the
//! canonical developer model the renderers consume.
//!
//! # Implementation Model
//!
//! [`SearchClient`] performs the single HTTP exchange with the search
//! service (`GET /api/search?q=...`) and classifies the answer into a
//! [`SearchOutcome`]: a result set, a valid empty answer, or an
//! application-level error. Transport failures surface as errors instead.
//!
//! [`SearchSession`] drives the submit → pending → settled lifecycle.
//! Each submission is tagged with a monotonically increasing sequence
//! number and only the newest submission's settlement is ever applied, so
//! a slow response from an abandoned submission cannot overwrite fresher
//! data.
//!
//! [`StatusTicker`] rotates a cosmetic status message while a submission
//! is pending and is torn down deterministically the instant the session
//! settles.
//!
//! Response decoding lives in `response`: the two historically-seen record
//! shapes are modeled as an untagged union and normalized into the single
//! canonical [`Developer`](crate::model::Developer); malformed fields
//! degrade to safe defaults record-locally so one bad record never blanks
//! the rest of the result set.

mod client;
mod response;
mod session;
mod ticker;

pub use client::{SearchClient, SearchOutcome, classify_payload};
pub use response::{FIELD_DELIMITER, RawRecord, decode_records};
pub use session::{NO_MATCHES_MESSAGE, SearchFailure, SearchSession, SessionState, TRANSPORT_FAILURE_MESSAGE};
pub use ticker::StatusTicker;
