//! # Configuration Module / 配置模块
//!
//! Parses the optional `Splitter.toml` file. Job defaults are not
//! configured here: they are fixed and live in `GlobalDefaults`.
//!
//! 解析可选的 `Splitter.toml` 文件。作业默认值不在此处配置，它们固定在 `GlobalDefaults` 中。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::matrix::NamingRules;

/// Settings for the external partition extractor.
/// 外部分区提取工具的设置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractorConfig {
    /// Command line of the extractor. `{binary}` is replaced by the compiled
    /// test binary path; without it the path is appended.
    ///
    /// 提取工具的命令行。`{binary}` 会被替换为已编译测试程序的路径；没有占位符时追加路径。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Upper bound for one extractor run, in seconds.
    /// 单次提取运行的时间上限（秒）。
    #[serde(default = "default_extractor_timeout")]
    pub timeout_secs: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            command: None,
            timeout_secs: default_extractor_timeout(),
        }
    }
}

/// The splitter configuration, loaded from a TOML file.
/// 从 TOML 文件加载的拆分器配置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SplitterConfig {
    /// The language for console messages (e.g., "en", "zh-CN").
    /// 控制台消息的语言（例如 "en", "zh-CN"）。
    #[serde(default = "default_language")]
    pub language: String,

    /// Organizational prefix stripped from project names for short names.
    /// 生成短名称时从项目名称中去除的组织前缀。
    #[serde(default)]
    pub org_prefix: String,

    /// Suffix stripped from project names for short names.
    /// 生成短名称时从项目名称中去除的后缀。
    #[serde(default = "default_tests_suffix")]
    pub tests_suffix: String,

    /// Partition labels that never get a job of their own.
    /// 永远不会拥有独立作业的分区标签。
    #[serde(default)]
    pub skip_labels: Vec<String>,

    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            org_prefix: String::new(),
            tests_suffix: default_tests_suffix(),
            skip_labels: Vec::new(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl SplitterConfig {
    pub fn naming(&self) -> NamingRules {
        NamingRules {
            org_prefix: self.org_prefix.clone(),
            tests_suffix: self.tests_suffix.clone(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_tests_suffix() -> String {
    ".Tests".to_string()
}

fn default_extractor_timeout() -> u64 {
    120
}

/// Loads and parses a configuration file.
pub fn load_config(path: &Path) -> Result<SplitterConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Loads the configuration file if it exists, otherwise returns the built-in
/// configuration. A present but malformed file is still an error.
///
/// 配置文件存在时加载它，否则返回内置配置。文件存在但格式错误时仍然报错。
pub fn load_config_or_default(path: &Path) -> Result<SplitterConfig> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using built-in configuration");
        Ok(SplitterConfig::default())
    }
}
