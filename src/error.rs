//! # Error Types / 错误类型
//!
//! Domain failures raised by discovery and matrix building. Each variant names
//! the project or path it concerns so that a halted CI step points straight at
//! the offending input.
//!
//! 发现和矩阵构建过程中产生的领域错误。每个变体都会指明相关的项目或路径。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    /// The raw test listing for a project does not exist.
    /// 项目的原始测试列表不存在。
    #[error("test listing for project '{project}' not found at {}", .path.display())]
    ListingNotFound { project: String, path: PathBuf },

    #[error("cannot read test listing for project '{project}' at {}", .path.display())]
    ListingUnreadable {
        project: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Class mode was selected but nothing matched the class-name prefix.
    /// 选择了类模式，但没有任何内容匹配类名前缀。
    #[error(
        "project '{project}' has no partition labels and no test classes matching prefix '{prefix}'"
    )]
    NoClassesFound { project: String, prefix: String },

    #[error("test lists directory not found: {}", .0.display())]
    ListsDirNotFound(PathBuf),

    /// A `.tests.list` file could not be parsed.
    /// 无法解析 `.tests.list` 文件。
    #[error("malformed test list '{source_name}': {reason}")]
    MalformedList { source_name: String, reason: String },

    #[error("invalid metadata for project '{project}': {reason}")]
    InvalidMetadata { project: String, reason: String },

    /// The external partition extractor could not produce labels.
    /// 外部分区提取工具未能生成标签。
    #[error("partition extractor for project '{project}' failed: {reason}")]
    ExtractorFailed { project: String, reason: String },

    #[error("invalid test class prefix '{prefix}'")]
    InvalidPrefix {
        prefix: String,
        #[source]
        source: regex::Error,
    },
}
