//! Data model for the curator device import.
//!
//! A [`Row`] is what the CSV reader hands over, a [`NormalizedItem`] is what a
//! sink receives, and an [`ImportSummary`] is what a run reports back.

pub mod item;
pub mod outcome;
pub mod row;
pub mod summary;

pub use item::NormalizedItem;
pub use outcome::{SkipReason, WriteError};
pub use row::Row;
pub use summary::{ImportSummary, IssueKind, RowIssue};
