use anyhow::{anyhow, Context, Result};
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::document::model::decode_json;
use crate::errors::AppError;

// @module: File and directory utilities for the validator's input side

/// File name suffix of STJ documents
pub const STJ_FILE_SUFFIX: &str = ".stj.json";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Whether the path looks like an STJ document (`*.stj.json`)
    pub fn is_stj_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase().ends_with(STJ_FILE_SUFFIX))
            .unwrap_or(false)
    }

    /// Find STJ documents below a directory, sorted by path
    pub fn find_stj_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::is_stj_file(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        debug!("Found {} STJ files in {:?}", result.len(), dir.as_ref());
        Ok(result)
    }

    /// Expand CLI inputs: files are kept as given, directories are searched
    pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for path in paths {
            if Self::file_exists(path) {
                files.push(path.clone());
            } else if Self::dir_exists(path) {
                files.extend(Self::find_stj_files(path)?);
            } else {
                return Err(anyhow!("Input path does not exist: {:?}", path));
            }
        }

        Ok(files)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read and decode a JSON file
    ///
    /// I/O failures become `AppError::File`; content that does not decode
    /// becomes `AppError::Malformed`.
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Value, AppError> {
        let content = Self::read_to_string(&path).map_err(|e| AppError::File(format!("{:#}", e)))?;
        Ok(decode_json(&content)?)
    }
}
