//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as locating list files and writing output artifacts atomically.
//!
//! 此模块提供文件系统操作的实用功能，
//! 如查找列表文件以及原子地写入输出产物。

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes `contents` to `path` by persisting a temporary sibling file.
/// Readers never observe a half-written list or matrix, even when several
/// discovery processes target the same directory.
///
/// 通过持久化同目录下的临时文件将 `contents` 写入 `path`。
/// 即使多个发现进程写入同一目录，读取方也不会看到写了一半的文件。
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".matrix_splitter_")
        .tempfile_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    temp.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    temp.persist(path)
        .with_context(|| format!("Failed to persist {}", path.display()))?;
    Ok(())
}

/// Lists the files directly inside `dir` whose names end with `suffix`,
/// sorted by file name.
///
/// # Arguments
/// * `dir` - Directory to scan (not recursive)
/// * `suffix` - File name suffix, e.g. `.tests.list`
pub fn find_files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix) && name.len() > suffix.len());
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Checks if a path exists and is a directory.
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}
