//! Standardized cruise measurement tables.
//!
//! A [`StandardizedTable`] is an immutable grid of typed cells whose columns
//! are described by [`TypedField`](cruise_model::TypedField)s. Tables are
//! built either directly from typed columns ([`StandardizedTable::from_typed`])
//! or by promoting a loosely declared [`UserTable`]
//! ([`StandardizedTable::promote`]), which parses raw cells, resolves one
//! canonical sample time per row, and synthesizes the derived time columns.
//!
//! Sample time resolution lives in [`datetime`]; strategies are tried in a
//! fixed precedence order and row-level failures are reported as data.

pub mod coverage;
pub mod datetime;
pub mod error;
pub mod promote;
pub mod roles;
pub mod table;
pub mod user_table;

pub use coverage::apply_coverage;
pub use datetime::{
    RowTimeFailure, TimeParseError, TimeParts, TimeResolution, TimeStrategy, decompose_time,
    format_time, resolve_times,
};
pub use error::{Result, TableError};
pub use promote::{CellIssue, PromotionReport};
pub use roles::{RoleIndex, SemanticRole};
pub use table::{Row, StandardizedTable};
pub use user_table::{DEFAULT_MISSING_TOKENS, UnparsableCell, UserColumn, UserTable};
