//! # Listing Classifier Module / 测试列表分类模块
//!
//! Scans the raw enumeration of test names produced by a compiled test binary.
//! Class names are derived with a namespace-prefix anchored pattern; partition
//! labels can be read from inline `Collection: <label>` banner lines.
//!
//! 扫描已编译测试程序输出的原始测试名称列表。
//! 类名通过以命名空间前缀为锚点的模式得到；分区标签可以从内联的
//! `Collection: <label>` 横幅行读取。

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::SplitError;

/// Pattern of an inline partition banner line.
const BANNER_PATTERN: &str = r"^\s*Collection:\s*(?P<label>\S.*?)\s*$";

static BANNER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(BANNER_PATTERN).expect("valid banner pattern"));

/// Reads a raw listing file into lines.
///
/// # Errors
/// `SplitError::ListingNotFound` if the file is missing, which is fatal for
/// the project's discovery step.
///
/// 将原始测试列表文件读取为行。文件不存在时返回 `SplitError::ListingNotFound`。
pub fn read_listing(path: &Path, project: &str) -> Result<Vec<String>, SplitError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content.lines().map(str::to_string).collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SplitError::ListingNotFound {
            project: project.to_string(),
            path: path.to_path_buf(),
        }),
        Err(source) => Err(SplitError::ListingUnreadable {
            project: project.to_string(),
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Extracts class names by matching `prefix.<Segment>.` at the start of a line.
/// 通过匹配行首的 `prefix.<Segment>.` 来提取类名。
#[derive(Debug, Clone)]
pub struct ClassNameMatcher {
    prefix: String,
    pattern: Regex,
}

impl ClassNameMatcher {
    pub fn new(prefix: &str) -> Result<Self, SplitError> {
        let prefix = prefix.trim().trim_end_matches('.').to_string();
        let pattern = Regex::new(&format!(r"^\s*{}\.([^.\s(]+)\.", regex::escape(&prefix)))
            .map_err(|source| SplitError::InvalidPrefix {
                prefix: prefix.clone(),
                source,
            })?;
        Ok(Self { prefix, pattern })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `prefix.<Segment>` when the line names a test under the prefix.
    pub fn class_name(&self, line: &str) -> Option<String> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|segment| format!("{}.{}", self.prefix, segment.as_str()))
    }
}

/// Collects the distinct class names found in a listing.
/// Non-matching lines (banners, blanks, nested rows) are ignored.
///
/// 收集列表中发现的不同类名。不匹配的行（横幅、空行、嵌套行）会被忽略。
pub fn extract_class_names<S: AsRef<str>>(lines: &[S], matcher: &ClassNameMatcher) -> BTreeSet<String> {
    lines
        .iter()
        .filter_map(|line| matcher.class_name(line.as_ref()))
        .collect()
}

/// Collects partition labels announced by inline banner lines.
/// 收集内联横幅行声明的分区标签。
pub fn extract_banner_labels<S: AsRef<str>>(lines: &[S]) -> BTreeSet<String> {
    lines
        .iter()
        .filter_map(|line| {
            BANNER_REGEX
                .captures(line.as_ref())
                .and_then(|caps| caps.name("label"))
                .map(|label| label.as_str().trim().to_string())
        })
        .filter(|label| !label.is_empty())
        .collect()
}

/// Drops every label that case-sensitively equals an entry of the skip list.
/// 丢弃与跳过列表中某项（区分大小写）完全相同的标签。
pub fn filter_labels(labels: BTreeSet<String>, skip: &[String]) -> BTreeSet<String> {
    let skip: BTreeSet<&str> = skip
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    labels
        .into_iter()
        .filter(|label| !skip.contains(label.as_str()))
        .collect()
}
