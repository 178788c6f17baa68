//! Command-line front end for cruise data conversion.
//!
//! The binary is a thin shell over [`commands`]; everything it prints is
//! built from the result types in [`types`].

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
