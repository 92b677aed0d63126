//! The canonical developer model and the normalization/aggregation core
//!
//! This module turns the heterogeneous search response into a single
//! canonical representation and derives everything the renderers need
//! from it.
//!
//! # Implementation Model
//!
//! The core is three small, pure pieces:
//! - **Field parsing** ([`parse_delimited`]): delimiter-encoded scalar
//!   fields become ordered value sequences.
//! - **Category resolution** ([`CategoryTable`]): raw language and
//!   project-type tokens resolve to stable display [`Bucket`]s, with a
//!   neutral fallback for tokens the tables do not know.
//! - **Aggregation** ([`aggregate`]): per-repository contribution records
//!   reduce to scalar summary metrics and an [`AbilityTier`] display band.
//!
//! Everything here is synchronous and side-effect-free; derived data is
//! recomputed from scratch for each search response rather than mutated
//! in place.

mod aggregate;
mod category;
mod developer;
mod fields;

pub use aggregate::{AbilityTier, ContributionSummary, NUM_ABILITY_TIERS, aggregate};
pub use category::{Bucket, CategoryTable, language_table, project_type_table};
pub use developer::{Developer, RepoContribution};
pub use fields::{display_label, parse_delimited};
