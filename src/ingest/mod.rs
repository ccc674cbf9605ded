//! Record normalization for metadata-change exports.
//!
//! Raw delimited text is split into rows, the header row is mapped onto
//! logical fields through an [`AliasTable`], and every data row with both a
//! story id and a component id becomes a [`ChangeRecord`](crate::core::ChangeRecord).
//! Rows missing either id are skipped without error.

pub mod columns;
pub mod delimited;
pub mod normalizer;
pub mod timestamps;

pub use columns::{AliasTable, ColumnMap, LogicalField};
pub use delimited::split_rows;
pub use normalizer::{normalize, normalize_as, normalize_baseline, InputKind};
pub use timestamps::parse_timestamp;
