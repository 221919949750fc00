//! # Project Sources Module / 项目来源模块
//!
//! Gathers the inputs of a matrix pass: every `<project>.tests.list` in the
//! lists directory with its metadata, and the declared regular projects.
//!
//! 收集矩阵构建所需的输入：列表目录中的每个 `<project>.tests.list` 及其元数据，
//! 以及声明的常规项目。

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use crate::core::list_file::{
    LIST_FILE_SUFFIX, metadata_file_path, project_name_from_list_path, read_list_file,
};
use crate::core::matrix::{NamingRules, SplitProject};
use crate::core::metadata::{
    EffectiveMetadata, GlobalDefaults, ProjectMetadata, load_project_metadata_or_default, resolve,
};
use crate::error::SplitError;
use crate::infra::fs::{find_files_with_suffix, is_directory};

/// Loads every list file in `dir` together with its resolved metadata.
///
/// # Errors
/// `SplitError::ListsDirNotFound` when `dir` is absent. An existing but empty
/// directory is not an error and yields no projects.
///
/// 加载 `dir` 中的每个列表文件及其解析后的元数据。
/// 目录不存在时返回 `SplitError::ListsDirNotFound`；目录存在但为空不是错误。
pub fn load_split_projects(dir: &Path, defaults: &GlobalDefaults) -> Result<Vec<SplitProject>> {
    if !is_directory(dir) {
        return Err(SplitError::ListsDirNotFound(dir.to_path_buf()).into());
    }

    let mut projects = Vec::new();
    for path in find_files_with_suffix(dir, LIST_FILE_SUFFIX)? {
        let Some(project) = project_name_from_list_path(&path) else {
            continue;
        };
        let record = read_list_file(&path)?;
        let stored = load_project_metadata_or_default(&metadata_file_path(dir, &project), &project);
        let metadata = resolve(&project, stored.as_ref(), defaults);
        tracing::debug!(
            project = %metadata.project_name,
            mode = %record.mode(),
            units = record.unit_count(),
            "loaded test list"
        );
        projects.push(SplitProject { record, metadata });
    }
    Ok(projects)
}

/// Loads the projects that are not split.
///
/// The rich JSON description wins wholesale when its file exists; otherwise
/// the legacy list of short names is used with built-in defaults only. The two
/// sources are never merged.
///
/// 加载不拆分的项目。
/// JSON 描述文件存在时完全优先；否则使用旧式短名称列表并仅使用内置默认值。两种来源从不合并。
pub fn load_regular_projects(
    json: Option<&Path>,
    legacy: Option<&Path>,
    naming: &NamingRules,
    defaults: &GlobalDefaults,
) -> Result<Vec<EffectiveMetadata>> {
    if let Some(json) = json.filter(|path| path.is_file()) {
        let content = fs::read_to_string(json)
            .with_context(|| format!("Failed to read regular projects: {}", json.display()))?;
        return parse_regular_projects_json(&content, defaults)
            .with_context(|| format!("Failed to parse regular projects: {}", json.display()));
    }

    match legacy {
        Some(legacy) => {
            let content = fs::read_to_string(legacy).with_context(|| {
                format!("Failed to read regular project names: {}", legacy.display())
            })?;
            Ok(parse_legacy_project_names(&content, naming, defaults))
        }
        None => Ok(Vec::new()),
    }
}

/// Parses a JSON array of metadata records. Each record must name its project.
pub fn parse_regular_projects_json(
    content: &str,
    defaults: &GlobalDefaults,
) -> Result<Vec<EffectiveMetadata>> {
    let records: Vec<ProjectMetadata> = serde_json::from_str(content)?;
    let mut projects = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let Some(project) = record
            .project_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        else {
            bail!("regular project #{} has no projectName", index + 1);
        };
        projects.push(resolve(project, Some(record), defaults));
    }
    Ok(projects)
}

/// Parses short names separated by newlines or `;`. Blank entries and lines
/// starting with `#` are ignored.
///
/// 解析以换行或 `;` 分隔的短名称。空项和以 `#` 开头的行会被忽略。
pub fn parse_legacy_project_names(
    content: &str,
    naming: &NamingRules,
    defaults: &GlobalDefaults,
) -> Vec<EffectiveMetadata> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .flat_map(|line| line.split(';'))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|short| resolve(&naming.project_name_for(short), None, defaults))
        .collect()
}
