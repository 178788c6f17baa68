//! Thin layer over `netcdf3`: a staged dataset with its values, committed
//! to disk in one rename, and a reader that checks sizes against the file
//! before loading a variable.

use std::ffi::OsString;
use std::fmt::Debug;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use netcdf3::{DataSet, DataType, DataVector, FileReader, FileWriter, Variable, Version};

use crate::error::{DsgError, Result};
use crate::layout::AttrValue;

/// A dataset definition plus the values of each of its variables, ready to
/// be written.
#[derive(Debug)]
pub struct DsgFile {
    data_set: DataSet,
    values: Vec<(String, DataVector)>,
}

impl DsgFile {
    pub(crate) fn new() -> Self {
        Self {
            data_set: DataSet::new(),
            values: Vec::new(),
        }
    }

    pub fn data_set(&self) -> &DataSet {
        &self.data_set
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// Values staged for variable `name`.
    pub fn values(&self, name: &str) -> Option<&DataVector> {
        self.values
            .iter()
            .find(|(variable, _)| variable == name)
            .map(|(_, values)| values)
    }

    pub(crate) fn add_fixed_dim(&mut self, name: &str, size: usize) -> Result<()> {
        self.data_set.add_fixed_dim(name, size).map_err(layout_error)
    }

    pub(crate) fn set_unlimited_dim(&mut self, name: &str, size: usize) -> Result<()> {
        self.data_set.set_unlimited_dim(name, size).map_err(layout_error)
    }

    pub(crate) fn add_global_text(&mut self, name: &str, value: &str) -> Result<()> {
        self.data_set
            .add_global_attr_string(name, value)
            .map_err(layout_error)
    }

    /// Declare variable `name` over `dims` with the storage of `values`.
    pub(crate) fn add_variable(&mut self, name: &str, dims: &[&str], values: DataVector) -> Result<()> {
        let added = match &values {
            DataVector::I8(_) => self.data_set.add_var_i8(name, dims),
            DataVector::U8(_) => self.data_set.add_var_u8(name, dims),
            DataVector::I16(_) => self.data_set.add_var_i16(name, dims),
            DataVector::I32(_) => self.data_set.add_var_i32(name, dims),
            DataVector::F32(_) => self.data_set.add_var_f32(name, dims),
            DataVector::F64(_) => self.data_set.add_var_f64(name, dims),
        };
        added.map_err(layout_error)?;
        self.values.push((name.to_string(), values));
        Ok(())
    }

    pub(crate) fn add_attribute(&mut self, variable: &str, name: &str, value: &AttrValue) -> Result<()> {
        let added = match value {
            AttrValue::Text(text) => self.data_set.add_var_attr_string(variable, name, text),
            AttrValue::Int(number) => self.data_set.add_var_attr_i32(variable, name, vec![*number]),
            AttrValue::Double(number) => {
                self.data_set.add_var_attr_f64(variable, name, vec![*number])
            }
        };
        added.map_err(layout_error)
    }

    /// Write the dataset so that `path` either keeps its previous contents or
    /// holds the complete new file.
    ///
    /// The file is written and synced under a sibling temporary name, then
    /// renamed over `path`. The temporary file is removed when any step fails.
    pub fn write(&self, path: &Path, version: Version) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DsgError::io("create directory", parent, e))?;
        }

        let temp_path = temp_path_for(path);
        tracing::debug!(path = %temp_path.display(), ?version, "staging NetCDF file");
        if let Err(err) = self.write_staged(&temp_path, version) {
            remove_temp(&temp_path);
            return Err(err);
        }
        if let Err(source) = fs::rename(&temp_path, path) {
            remove_temp(&temp_path);
            return Err(DsgError::io("rename into", path, source));
        }
        tracing::debug!(path = %path.display(), "committed NetCDF file");
        Ok(())
    }

    fn write_staged(&self, path: &Path, version: Version) -> Result<()> {
        let mut writer = FileWriter::open(path).map_err(|err| write_error(path, err))?;
        writer
            .set_def(&self.data_set, version, 0)
            .map_err(|err| write_error(path, err))?;
        for (name, values) in &self.values {
            let written = match values {
                DataVector::I8(data) => writer.write_var_i8(name, data),
                DataVector::U8(data) => writer.write_var_u8(name, data),
                DataVector::I16(data) => writer.write_var_i16(name, data),
                DataVector::I32(data) => writer.write_var_i32(name, data),
                DataVector::F32(data) => writer.write_var_f32(name, data),
                DataVector::F64(data) => writer.write_var_f64(name, data),
            };
            written.map_err(|err| write_error(path, err))?;
        }
        writer.close().map_err(|err| write_error(path, err))?;

        File::open(path)
            .and_then(|file| file.sync_all())
            .map_err(|e| DsgError::io("sync", path, e))
    }
}

/// An open trajectory file.
pub(crate) struct DsgSource {
    path: PathBuf,
    reader: FileReader,
    file_len: u64,
}

impl DsgSource {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let file_len = fs::metadata(path)
            .map_err(|e| DsgError::io("read", path, e))?
            .len();
        let reader = FileReader::open(path).map_err(|err| read_error(path, err))?;
        Ok(Self {
            path: path.to_path_buf(),
            reader,
            file_len,
        })
    }

    pub(crate) fn file_len(&self) -> u64 {
        self.file_len
    }

    /// Dimension lengths of variable `name`; the record dimension counts
    /// the records the header declares.
    pub(crate) fn shape(&self, name: &str) -> Option<Vec<usize>> {
        let data_set = self.reader.data_set();
        data_set
            .get_var(name)?
            .dim_names()
            .iter()
            .map(|dim| data_set.dim_size(dim))
            .collect()
    }

    pub(crate) fn dim_size(&self, name: &str) -> Option<usize> {
        self.reader.data_set().dim_size(name)
    }

    pub(crate) fn global_text(&self, name: &str) -> Option<String> {
        self.reader.data_set().get_global_attr_as_string(name)
    }

    /// Load every value of variable `name`.
    ///
    /// Fails with [`DsgError::Truncated`] instead of allocating when the
    /// header claims more data than the file can hold.
    pub(crate) fn read(&mut self, name: &str) -> Result<DataVector> {
        let data_type = self
            .reader
            .data_set()
            .get_var(name)
            .map(Variable::data_type)
            .ok_or_else(|| DsgError::Layout {
                message: format!("no variable named {name}"),
            })?;
        let needed = self
            .shape(name)
            .unwrap_or_default()
            .into_iter()
            .try_fold(element_size(data_type), |bytes, len| {
                bytes.checked_mul(u64::try_from(len).ok()?)
            });
        match needed {
            Some(needed) if needed <= self.file_len => {}
            needed => {
                return Err(DsgError::Truncated {
                    name: name.to_string(),
                    needed: needed.unwrap_or(u64::MAX),
                    available: self.file_len,
                });
            }
        }
        self.reader
            .read_var(name)
            .map_err(|err| read_error(&self.path, err))
    }
}

/// Name of a storage type as it appears in CDL.
pub(crate) fn storage_name(values: &DataVector) -> &'static str {
    match values {
        DataVector::I8(_) => "byte",
        DataVector::U8(_) => "char",
        DataVector::I16(_) => "short",
        DataVector::I32(_) => "int",
        DataVector::F32(_) => "float",
        DataVector::F64(_) => "double",
    }
}

fn element_size(data_type: DataType) -> u64 {
    match data_type {
        DataType::I8 | DataType::U8 => 1,
        DataType::I16 => 2,
        DataType::I32 | DataType::F32 => 4,
        DataType::F64 => 8,
    }
}

fn layout_error(err: impl Debug) -> DsgError {
    DsgError::Layout {
        message: format!("{err:?}"),
    }
}

fn write_error(path: &Path, err: impl Debug) -> DsgError {
    DsgError::Write {
        path: path.to_path_buf(),
        message: format!("{err:?}"),
    }
}

fn read_error(path: &Path, err: impl Debug) -> DsgError {
    DsgError::Read {
        path: path.to_path_buf(),
        message: format!("{err:?}"),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("dataset.nc"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn remove_temp(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        tracing::debug!(path = %path.display(), error = %err, "could not remove temporary file");
    }
}
