//! Testing infrastructure shared by unit and integration tests.
//!
//! - **Builders**: [`helpers::record`] and friends create [`ChangeRecord`](crate::core::ChangeRecord)
//!   values from short date strings, and [`helpers::export_csv`] renders
//!   rows back into export text for normalizer and CLI tests.
//! - **Assertion macros**: [`crate::assert_result_ok!`], [`crate::assert_result_err!`]
//!   and [`crate::assert_contains_error!`] for `Result`-returning operations.
//!
//! # Quick Start
//!
//! ```rust
//! use conflictmap::testkit::helpers::{at, record};
//! use conflictmap::conflicts::group_conflicts;
//! use conflictmap::risk::RiskClassifier;
//!
//! let records = vec![
//!     record("US-1", "ClassA", "2024-01-10"),
//!     record("US-2", "ClassA", "2024-01-01"),
//! ];
//! let groups = group_conflicts(&records, &RiskClassifier::default(), at("2024-01-20"));
//! assert_eq!(groups[0].days_behind, 9);
//! ```

pub mod assertions;
pub mod helpers;

pub use helpers::{at, export_csv, record, record_by, record_undated};
