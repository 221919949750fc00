//! # Matrix Builder Module / 矩阵构建模块
//!
//! Turns per-project split decisions and resolved metadata into a flat,
//! ordered list of CI job entries.
//!
//! - Collection mode: one `collection` entry per retained label, then exactly
//!   one `uncollected` entry whose filter excludes every retained label.
//! - Class mode: one `class` entry per discovered class.
//! - Regular projects: one `regular` entry each.
//!
//! Optional fields go through `JobOverrides::diff`, so only values that
//! differ from the global defaults reach the output.
//!
//! 将每个项目的拆分决定和解析后的元数据转换为扁平有序的 CI 作业条目列表。

use crate::core::filter::{TestFilter, join_args};
use crate::core::metadata::{EffectiveMetadata, GlobalDefaults, JobSettings};
use crate::core::models::{JobEntry, JobMatrix, JobType, TestListRecord};
use crate::core::sparse::JobOverrides;

/// Display name of the catch-all job.
pub const UNCOLLECTED_NAME: &str = "uncollected";

/// How short display names are derived from project names.
/// 如何从项目名称派生短显示名称。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRules {
    pub org_prefix: String,
    pub tests_suffix: String,
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {
            org_prefix: String::new(),
            tests_suffix: ".Tests".to_string(),
        }
    }
}

impl NamingRules {
    /// Strips the organizational prefix and the tests suffix from a project
    /// name. Either is kept when stripping would leave nothing.
    ///
    /// 从项目名称中去除组织前缀和测试后缀。如果去除后为空则保留。
    pub fn short_project_name(&self, project_name: &str) -> String {
        let mut short = project_name;
        if !self.org_prefix.is_empty() {
            if let Some(rest) = short.strip_prefix(&self.org_prefix).filter(|r| !r.is_empty()) {
                short = rest;
            }
        }
        if !self.tests_suffix.is_empty() {
            if let Some(rest) = short.strip_suffix(&self.tests_suffix).filter(|r| !r.is_empty()) {
                short = rest;
            }
        }
        short.to_string()
    }

    /// Expands a legacy short name back into a full project name.
    /// 将旧式短名称展开为完整项目名称。
    pub fn project_name_for(&self, short_name: &str) -> String {
        format!("{}{}{}", self.org_prefix, short_name, self.tests_suffix)
    }
}

/// Strips `prefix.` from a class name when it is a strict prefix, otherwise
/// returns the full name unchanged.
///
/// 当 `prefix.` 是类名的严格前缀时将其去除，否则原样返回完整名称。
pub fn strip_class_prefix(class_name: &str, prefix: &str) -> String {
    let prefix = prefix.trim_end_matches('.');
    if prefix.is_empty() {
        return class_name.to_string();
    }
    class_name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('.'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(class_name)
        .to_string()
}

/// A project that went through discovery, with its resolved metadata.
/// 经过发现步骤的项目及其解析后的元数据。
#[derive(Debug, Clone)]
pub struct SplitProject {
    pub record: TestListRecord,
    pub metadata: EffectiveMetadata,
}

/// Builds job entries against a fixed default record.
/// 基于固定默认记录构建作业条目。
#[derive(Debug, Clone, Copy)]
pub struct MatrixBuilder<'a> {
    defaults: &'a GlobalDefaults,
    naming: &'a NamingRules,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(defaults: &'a GlobalDefaults, naming: &'a NamingRules) -> Self {
        Self { defaults, naming }
    }

    /// Builds the whole matrix: split projects in lexicographic project-name
    /// order, then regular projects in their declared order.
    ///
    /// 构建完整矩阵：拆分项目按项目名称字典序排列，其后是按声明顺序排列的常规项目。
    pub fn build(&self, split: &[SplitProject], regular: &[EffectiveMetadata]) -> JobMatrix {
        let mut ordered: Vec<&SplitProject> = split.iter().collect();
        ordered.sort_by(|a, b| a.metadata.project_name.cmp(&b.metadata.project_name));

        let mut include = Vec::new();
        for project in ordered {
            include.extend(self.split_project_entries(&project.record, &project.metadata));
        }
        include.extend(regular.iter().map(|meta| self.regular_entry(meta)));
        JobMatrix { include }
    }

    /// Entries for one split project.
    pub fn split_project_entries(
        &self,
        record: &TestListRecord,
        meta: &EffectiveMetadata,
    ) -> Vec<JobEntry> {
        match record {
            TestListRecord::Collection { labels } => {
                let short = self.naming.short_project_name(&meta.project_name);
                let mut entries: Vec<JobEntry> = labels
                    .iter()
                    .map(|label| {
                        let filter = TestFilter::Trait {
                            value: label.clone(),
                        };
                        self.entry(
                            JobType::Collection,
                            meta,
                            label.clone(),
                            format!("{short}-{label}"),
                            None,
                            &filter,
                            &meta.job,
                        )
                    })
                    .collect();

                let catch_all = TestFilter::uncollected(labels.iter().cloned());
                entries.push(self.entry(
                    JobType::Uncollected,
                    meta,
                    UNCOLLECTED_NAME.to_string(),
                    format!("{short}-{UNCOLLECTED_NAME}"),
                    None,
                    &catch_all,
                    &meta.uncollected_job(),
                ));
                entries
            }
            TestListRecord::Class { classes } => classes
                .iter()
                .map(|class| {
                    let short = strip_class_prefix(class, &meta.test_class_names_prefix);
                    let filter = TestFilter::Class { name: class.clone() };
                    self.entry(
                        JobType::Class,
                        meta,
                        short.clone(),
                        short,
                        Some(class.clone()),
                        &filter,
                        &meta.job,
                    )
                })
                .collect(),
        }
    }

    /// The single entry of a project that is not split.
    /// 未拆分项目的唯一条目。
    pub fn regular_entry(&self, meta: &EffectiveMetadata) -> JobEntry {
        let short = self.naming.short_project_name(&meta.project_name);
        JobEntry {
            kind: JobType::Regular,
            project_name: meta.project_name.clone(),
            name: short.clone(),
            shortname: short,
            test_project_path: meta.test_project_path.clone(),
            full_class_name: None,
            overrides: JobOverrides::diff(&meta.job, &self.defaults.job),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn entry(
        &self,
        kind: JobType,
        meta: &EffectiveMetadata,
        name: String,
        shortname: String,
        full_class_name: Option<String>,
        filter: &TestFilter,
        settings: &JobSettings,
    ) -> JobEntry {
        let settings = JobSettings {
            extra_test_args: join_args(filter, &settings.extra_test_args),
            ..settings.clone()
        };
        JobEntry {
            kind,
            project_name: meta.project_name.clone(),
            name,
            shortname,
            test_project_path: meta.test_project_path.clone(),
            full_class_name,
            overrides: JobOverrides::diff(&settings, &self.defaults.job),
        }
    }
}
