//! # Metadata Resolver Module / 元数据解析模块
//!
//! Loads per-project metadata records and layers them over the fixed global
//! defaults, producing an effective configuration per project. Resolution is
//! pure: the defaults are an immutable value passed in by the caller and are
//! never modified.
//!
//! 加载每个项目的元数据记录，并将其叠加在固定的全局默认值之上，
//! 为每个项目生成有效配置。解析是纯函数：默认值由调用方以不可变值传入，永不修改。

use serde::{Deserialize, Deserializer};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::SplitError;

/// Environment tags every job supports unless told otherwise.
pub const DEFAULT_SUPPORTED_OSES: [&str; 3] = ["windows", "linux", "macos"];

/// The per-job settings that may diverge from the global default.
/// 可能与全局默认值不同的每作业设置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSettings {
    pub extra_test_args: String,
    pub requires_nugets: bool,
    pub requires_test_sdk: bool,
    pub enable_playwright_install: bool,
    pub test_session_timeout: String,
    pub test_hang_timeout: String,
    pub supported_oses: Vec<String>,
}

/// The fixed global default record.
///
/// Not externally configurable. Construct it once with `GlobalDefaults::default()`
/// and pass it by reference to the resolver and the matrix builder.
///
/// 固定的全局默认记录，不可外部配置。
/// 通过 `GlobalDefaults::default()` 构造一次，并以引用形式传给解析器和矩阵构建器。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalDefaults {
    pub job: JobSettings,
    pub uncollected_tests_session_timeout: String,
    pub uncollected_tests_hang_timeout: String,
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        Self {
            job: JobSettings {
                extra_test_args: String::new(),
                requires_nugets: false,
                requires_test_sdk: false,
                enable_playwright_install: false,
                test_session_timeout: "20m".to_string(),
                test_hang_timeout: "10m".to_string(),
                supported_oses: DEFAULT_SUPPORTED_OSES.iter().map(|s| s.to_string()).collect(),
            },
            uncollected_tests_session_timeout: "15m".to_string(),
            uncollected_tests_hang_timeout: "10m".to_string(),
        }
    }
}

/// A per-project metadata record as stored in `<project>.tests.metadata.json`.
/// Every field is optional; unrecognized keys are ignored.
///
/// 存储在 `<project>.tests.metadata.json` 中的项目元数据记录。
/// 所有字段都是可选的；无法识别的键会被忽略。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub test_class_names_prefix: Option<String>,
    #[serde(default)]
    pub test_project_path: Option<String>,
    #[serde(default)]
    pub extra_test_args: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub requires_nugets: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub requires_test_sdk: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub enable_playwright_install: Option<bool>,
    #[serde(default)]
    pub test_session_timeout: Option<String>,
    #[serde(default)]
    pub test_hang_timeout: Option<String>,
    #[serde(default)]
    pub uncollected_tests_session_timeout: Option<String>,
    #[serde(default)]
    pub uncollected_tests_hang_timeout: Option<String>,
    #[serde(default, rename = "supportedOSes")]
    pub supported_oses: Option<Vec<String>>,
}

/// Boolean fields arrive either as JSON booleans or as `"true"`/`"false"` strings.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            "" => Ok(None),
            other => Err(serde::de::Error::custom(format!(
                "expected \"true\" or \"false\", found \"{other}\""
            ))),
        },
    }
}

impl ProjectMetadata {
    /// Parses a metadata record from JSON text.
    pub fn from_json(project: &str, content: &str) -> Result<Self, SplitError> {
        serde_json::from_str(content).map_err(|e| SplitError::InvalidMetadata {
            project: project.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Loads a project's metadata file.
///
/// Returns `Ok(None)` when the file does not exist, which callers treat as an
/// all-default record.
///
/// 加载项目的元数据文件。文件不存在时返回 `Ok(None)`，调用方将其视为全默认记录。
pub fn load_project_metadata(
    path: &Path,
    project: &str,
) -> Result<Option<ProjectMetadata>, SplitError> {
    match fs::read_to_string(path) {
        Ok(content) => ProjectMetadata::from_json(project, &content).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SplitError::InvalidMetadata {
            project: project.to_string(),
            reason: format!("{}: {e}", path.display()),
        }),
    }
}

/// Loads a project's metadata file, degrading to defaults on any failure.
/// A malformed record is reported as a warning and treated as absent.
///
/// 加载项目的元数据文件，任何失败都降级为默认值。格式错误的记录会被警告并视为不存在。
pub fn load_project_metadata_or_default(path: &Path, project: &str) -> Option<ProjectMetadata> {
    match load_project_metadata(path, project) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(project, path = %path.display(), "{e}; falling back to defaults");
            None
        }
    }
}

/// The effective configuration for one project after layering.
/// 叠加后某个项目的有效配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveMetadata {
    pub project_name: String,
    pub test_class_names_prefix: String,
    pub test_project_path: String,
    pub job: JobSettings,
    pub uncollected_tests_session_timeout: String,
    pub uncollected_tests_hang_timeout: String,
}

impl EffectiveMetadata {
    /// Settings for the catch-all job: the general settings with the
    /// uncollected timeouts substituted in.
    ///
    /// 兜底作业的设置：将通用设置中的超时替换为 uncollected 超时。
    pub fn uncollected_job(&self) -> JobSettings {
        JobSettings {
            test_session_timeout: self.uncollected_tests_session_timeout.clone(),
            test_hang_timeout: self.uncollected_tests_hang_timeout.clone(),
            ..self.job.clone()
        }
    }
}

/// Default project path for a project that declares none.
pub fn default_test_project_path(project_name: &str) -> String {
    format!("tests/{project_name}/{project_name}.csproj")
}

/// Layers a project record over the global defaults.
///
/// Each field is taken from the record when present and from the defaults
/// otherwise, except the uncollected timeouts which fall back in two steps:
/// project uncollected value, then the project's own general timeout, then the
/// global uncollected default.
///
/// 将项目记录叠加到全局默认值上。
/// 每个字段存在时取自记录，否则取自默认值；uncollected 超时是例外，按两级回退：
/// 项目的 uncollected 值 → 项目自身的通用超时 → 全局 uncollected 默认值。
pub fn resolve(
    project_name: &str,
    record: Option<&ProjectMetadata>,
    defaults: &GlobalDefaults,
) -> EffectiveMetadata {
    let empty = ProjectMetadata::default();
    let record = record.unwrap_or(&empty);
    let base = &defaults.job;

    let project_name = record
        .project_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| project_name.to_string());

    let job = JobSettings {
        extra_test_args: record
            .extra_test_args
            .clone()
            .unwrap_or_else(|| base.extra_test_args.clone()),
        requires_nugets: record.requires_nugets.unwrap_or(base.requires_nugets),
        requires_test_sdk: record.requires_test_sdk.unwrap_or(base.requires_test_sdk),
        enable_playwright_install: record
            .enable_playwright_install
            .unwrap_or(base.enable_playwright_install),
        test_session_timeout: record
            .test_session_timeout
            .clone()
            .unwrap_or_else(|| base.test_session_timeout.clone()),
        test_hang_timeout: record
            .test_hang_timeout
            .clone()
            .unwrap_or_else(|| base.test_hang_timeout.clone()),
        supported_oses: record
            .supported_oses
            .clone()
            .unwrap_or_else(|| base.supported_oses.clone()),
    };

    let uncollected_tests_session_timeout = record
        .uncollected_tests_session_timeout
        .clone()
        .or_else(|| record.test_session_timeout.clone())
        .unwrap_or_else(|| defaults.uncollected_tests_session_timeout.clone());
    let uncollected_tests_hang_timeout = record
        .uncollected_tests_hang_timeout
        .clone()
        .or_else(|| record.test_hang_timeout.clone())
        .unwrap_or_else(|| defaults.uncollected_tests_hang_timeout.clone());

    EffectiveMetadata {
        test_class_names_prefix: record
            .test_class_names_prefix
            .clone()
            .filter(|prefix| !prefix.trim().is_empty())
            .unwrap_or_else(|| project_name.clone()),
        test_project_path: record
            .test_project_path
            .clone()
            .unwrap_or_else(|| default_test_project_path(&project_name)),
        project_name,
        job,
        uncollected_tests_session_timeout,
        uncollected_tests_hang_timeout,
    }
}
