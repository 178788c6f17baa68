//! Field registry and value model for standardized cruise data.
//!
//! Every column of a measurement table and every dataset-level attribute is
//! described by a [`TypedField`]: a stable variable name, a [`FieldKind`]
//! (text, integer, or real), descriptive metadata, and the kind's
//! missing-value sentinel.
//!
//! Fields are grouped into a [`FieldRegistry`], built once and passed by
//! reference to the table and file codec components.
//!
//! ```
//! use cruise_model::{FieldRegistry, MetadataRecord, Value, names};
//!
//! let registry = FieldRegistry::standard_metadata();
//! let mut record = MetadataRecord::new(&registry);
//! assert!(record.is_missing(names::DATASET_ID));
//!
//! record.set(names::DATASET_ID, Value::text("33RO20140113")).unwrap();
//! assert!(!record.is_missing(names::DATASET_ID));
//! ```

pub mod catalog;
pub mod error;
pub mod field;
pub mod kind;
pub mod metadata;
pub mod names;
pub mod registry;

pub use error::{ModelError, Result};
pub use field::TypedField;
pub use kind::{FieldKind, INTEGER_MISSING_VALUE, REAL_MISSING_VALUE, TEXT_MISSING_VALUE, Value};
pub use metadata::MetadataRecord;
pub use registry::FieldRegistry;
