//! Report generation for search results
//!
//! Two report generators consume the same normalized input, a slice of
//! [`Developer`](crate::model::Developer) in service rank order:
//! - **Console**: color-coded terminal output with per-repository
//!   evidence tables and an ability bar per candidate.
//! - **HTML**: a self-contained document with category chips and
//!   percentage-width ability bars, honoring light and dark color schemes.
//!
//! Renderers never reorder the per-repository evidence; row ordering of
//! developers is decided by the caller before rendering.

mod console;
mod html;

pub use console::generate as generate_console;
pub use html::generate as generate_html;
