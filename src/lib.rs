//! # Matrix Splitter Library / Matrix Splitter 库
//!
//! This library decides how a compiled test suite is split into independently
//! schedulable CI jobs and serializes that decision as a job matrix.
//!
//! 此库决定如何将已编译的测试套件拆分为可独立调度的 CI 作业，
//! 并将该决定序列化为作业矩阵。
//!
//! ## Modules / 模块
//!
//! - `core` - Discovery, mode selection, list files, metadata and matrix building
//! - `infra` - Infrastructure services like process capture and file system operations
//! - `reporting` - Console and HTML summaries of discovery and matrix results
//! - `cli` - Command-line interface
//! - `commands` - The `discover`, `matrix` and `init` subcommands
//!
//! - `core` - 发现、模式选择、列表文件、元数据和矩阵构建
//! - `infra` - 基础设施服务，如进程输出捕获和文件系统操作
//! - `reporting` - 发现和矩阵结果的控制台与 HTML 摘要
//! - `cli` - 命令行接口
//! - `commands` - `discover`、`matrix` 和 `init` 子命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::matrix;
pub use crate::core::metadata;
pub use crate::core::models;
pub use error::SplitError;

/// Resolves the UI locale from an explicit request or the system locale.
///
/// It attempts to match the full locale (e.g., "zh-CN"), then just the language
/// code (e.g., "en"), and finally falls back to the default language ("en").
///
/// 根据显式请求或系统区域设置解析界面语言。
/// 先尝试完整匹配（如 "zh-CN"），再尝试语言代码（如 "en"），最后回退到 "en"。
pub fn resolve_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale.as_str()) {
        return locale;
    }
    locale
        .split('-')
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
