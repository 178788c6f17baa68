//! Cruise data ingestion.
//!
//! Loads a sample CSV and its dataset declaration (a TOML file mapping
//! headers to registry fields plus dataset metadata) into the inputs of
//! table promotion: a [`UserTable`](cruise_core::UserTable) and a
//! [`MetadataRecord`](cruise_model::MetadataRecord).
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use cruise_core::StandardizedTable;
//! use cruise_ingest::{load_config, read_user_table};
//! use cruise_model::FieldRegistry;
//!
//! let config = load_config(Path::new("cruise.toml"))?;
//! let user = read_user_table(Path::new("cruise.csv"), &config)?;
//! let metadata = config.build_metadata(&FieldRegistry::standard_metadata())?;
//! let table = StandardizedTable::promote(&user, &FieldRegistry::standard_data())?;
//! # let _ = (metadata, table);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Declarations ===
pub use config::{ColumnSpec, DatasetConfig, load_config};

// === CSV Reading ===
pub use reader::{MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_user_table};
