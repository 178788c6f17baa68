//! CF trajectory files for standardized cruise data.
//!
//! A file holds one trajectory: every metadata field becomes a variable over
//! the length-1 `trajectory` dimension and every table column a variable over
//! the `obs` dimension, one entry per sample. Text is stored as fixed-width
//! character blocks padded with NUL; integers as `int`; reals as `double`.
//! Each variable carries its sentinel (`missing_value`, `_FillValue`) and
//! descriptive attributes. The container itself is read and written through
//! the `netcdf3` crate.
//!
//! ```no_run
//! use std::path::Path;
//! use cruise_dsg::{read_data, read_metadata};
//! use cruise_model::FieldRegistry;
//!
//! let path = Path::new("33RO20140113.nc");
//! let (_metadata, absent) = read_metadata(path, &FieldRegistry::standard_metadata())?;
//! let (table, _) = read_data(path, &FieldRegistry::standard_data())?;
//! println!("{} rows, {} absent metadata fields", table.num_rows(), absent.len());
//! # Ok::<(), cruise_dsg::DsgError>(())
//! ```

mod container;
mod error;
pub mod layout;
mod reader;
mod writer;

pub use container::DsgFile;
pub use error::{DsgError, Result};
pub use netcdf3::Version;
pub use reader::{read_data, read_metadata};
pub use writer::{REQUIRED_ROLES, build_dsg, write_dsg};
