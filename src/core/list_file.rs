//! # List File Module / 列表文件模块
//!
//! Serializes and parses `<project>.tests.list`, the line-oriented hand-off
//! between per-project discovery and cross-project matrix building.
//!
//! ```text
//! collection:Nightly
//! collection:Smoke
//! uncollected:*
//! ```
//! or
//! ```text
//! class:Org.Foo.ClassA
//! class:Org.Foo.ClassB
//! ```
//!
//! 序列化和解析 `<project>.tests.list`，它是每个项目的发现步骤与跨项目矩阵构建之间的交接文件。

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::TestListRecord;
use crate::error::SplitError;
use crate::infra::fs::write_atomic;

pub const LIST_FILE_SUFFIX: &str = ".tests.list";
pub const METADATA_FILE_SUFFIX: &str = ".tests.metadata.json";

const COLLECTION_PREFIX: &str = "collection:";
const UNCOLLECTED_PREFIX: &str = "uncollected:";
const CLASS_PREFIX: &str = "class:";

/// The catch-all line closing every collection-mode list.
pub const UNCOLLECTED_LINE: &str = "uncollected:*";

impl TestListRecord {
    /// Renders the record in list file format. Units are emitted in
    /// lexicographic order and every line ends with `\n`.
    ///
    /// 以列表文件格式输出记录。单元按字典序输出，每行以 `\n` 结尾。
    pub fn to_list_string(&self) -> String {
        let mut out = String::new();
        match self {
            TestListRecord::Collection { labels } => {
                for label in labels {
                    out.push_str(COLLECTION_PREFIX);
                    out.push_str(label);
                    out.push('\n');
                }
                out.push_str(UNCOLLECTED_LINE);
                out.push('\n');
            }
            TestListRecord::Class { classes } => {
                for class in classes {
                    out.push_str(CLASS_PREFIX);
                    out.push_str(class);
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Parses list file content. The first non-blank line decides the mode;
    /// any line that belongs to the other mode is rejected.
    ///
    /// # Arguments
    /// * `source_name` - Name used in error messages (usually the file path)
    /// * `content` - The file content
    ///
    /// 解析列表文件内容。第一个非空行决定模式；属于另一种模式的行会被拒绝。
    pub fn parse(source_name: &str, content: &str) -> Result<Self, SplitError> {
        let malformed = |reason: String| SplitError::MalformedList {
            source_name: source_name.to_string(),
            reason,
        };

        let mut lines = content
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty());

        let Some((_, first)) = lines.clone().next() else {
            return Err(malformed("file is empty".to_string()));
        };

        if first.starts_with(CLASS_PREFIX) {
            let mut classes = BTreeSet::new();
            for (index, line) in lines.by_ref() {
                let class = line
                    .strip_prefix(CLASS_PREFIX)
                    .ok_or_else(|| malformed(format!("line {}: expected 'class:' entry, found '{line}'", index + 1)))?
                    .trim();
                if class.is_empty() {
                    return Err(malformed(format!("line {}: empty class name", index + 1)));
                }
                classes.insert(class.to_string());
            }
            return Ok(TestListRecord::Class { classes });
        }

        if first.starts_with(COLLECTION_PREFIX) || first.starts_with(UNCOLLECTED_PREFIX) {
            let mut labels = BTreeSet::new();
            for (index, line) in lines.by_ref() {
                if let Some(label) = line.strip_prefix(COLLECTION_PREFIX) {
                    let label = label.trim();
                    if label.is_empty() {
                        return Err(malformed(format!("line {}: empty collection label", index + 1)));
                    }
                    labels.insert(label.to_string());
                } else if line.starts_with(UNCOLLECTED_PREFIX) {
                    // The catch-all is implicit in the record.
                } else {
                    return Err(malformed(format!(
                        "line {}: expected 'collection:' or 'uncollected:' entry, found '{line}'",
                        index + 1
                    )));
                }
            }
            return Ok(TestListRecord::Collection { labels });
        }

        Err(malformed(format!("unrecognized first line '{first}'")))
    }
}

/// Path of the list file for `project` inside `dir`.
pub fn list_file_path(dir: &Path, project: &str) -> PathBuf {
    dir.join(format!("{project}{LIST_FILE_SUFFIX}"))
}

/// Path of the metadata file for `project` inside `dir`.
pub fn metadata_file_path(dir: &Path, project: &str) -> PathBuf {
    dir.join(format!("{project}{METADATA_FILE_SUFFIX}"))
}

/// Extracts the project name from a `<project>.tests.list` path.
/// 从 `<project>.tests.list` 路径中提取项目名称。
pub fn project_name_from_list_path(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(LIST_FILE_SUFFIX))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Writes the record for `project` into `dir` and returns the file path.
pub fn write_list_file(dir: &Path, project: &str, record: &TestListRecord) -> Result<PathBuf> {
    let path = list_file_path(dir, project);
    write_atomic(&path, &record.to_list_string())
        .with_context(|| format!("Failed to write test list for project '{project}'"))?;
    Ok(path)
}

/// Reads and parses a list file.
pub fn read_list_file(path: &Path) -> Result<TestListRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read test list: {}", path.display()))?;
    Ok(TestListRecord::parse(&path.display().to_string(), &content)?)
}
