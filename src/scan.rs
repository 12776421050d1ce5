//! Image discovery.
//!
//! Walks a directory and collects every file the decoder can read, so a batch
//! of stored artwork images can be handed to [`process`](crate::process).
//!
//! ## Rules
//!
//! - Only regular files whose extension is in
//!   [`supported_input_extensions`](crate::imaging::supported_input_extensions)
//!   are kept (case-insensitive).
//! - Hidden entries (name starting with `.`) are skipped, directories included.
//! - Subdirectories are visited unless `scan.recursive = false`.
//! - Symlinks are not followed.
//! - Results are sorted by path so output is stable between runs.

use crate::config::ScanConfig;
use crate::imaging::is_supported_image;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    RootNotFound(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Collect all decodable image files under `root`.
pub fn scan(root: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let mut images = Vec::new();
    for entry in WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry?;
        if entry.file_type().is_file() && is_supported_image(entry.path()) {
            images.push(entry.into_path());
        }
    }
    images.sort();

    log::info!("Found {} images under {}", images.len(), root.display());
    Ok(images)
}
