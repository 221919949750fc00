//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the splitter.
//! It includes the persisted per-project split decision and the job entries
//! that make up the final CI matrix.
//!
//! 此模块定义了整个拆分器中使用的核心数据结构。
//! 它包括持久化的每个项目拆分决定，以及组成最终 CI 矩阵的作业条目。

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::core::sparse::JobOverrides;

/// The two mutually exclusive splitting strategies.
/// 两种互斥的拆分策略。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Split by explicit partition labels, plus a catch-all job.
    /// 按显式分区标签拆分，并附加一个兜底作业。
    Collection,
    /// Split by test class.
    /// 按测试类拆分。
    Class,
}

impl SplitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMode::Collection => "collection",
            SplitMode::Class => "class",
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted split decision for one project.
///
/// The two variants cannot share units, so a record never mixes collection
/// lines and class lines. Sets are `BTreeSet`s, which keeps every iteration
/// lexicographic and therefore every serialization byte-identical.
///
/// 单个项目持久化的拆分决定。
/// 两个变体互不共享单元，因此记录永远不会混合集合行和类行。
/// 使用 `BTreeSet` 保证迭代按字典序进行，序列化结果字节一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestListRecord {
    /// Retained partition labels. The `uncollected:*` catch-all is implicit.
    /// 保留的分区标签。`uncollected:*` 兜底单元是隐式的。
    Collection { labels: BTreeSet<String> },
    /// Discovered fully-qualified class names.
    /// 发现的完全限定类名。
    Class { classes: BTreeSet<String> },
}

impl TestListRecord {
    pub fn mode(&self) -> SplitMode {
        match self {
            TestListRecord::Collection { .. } => SplitMode::Collection,
            TestListRecord::Class { .. } => SplitMode::Class,
        }
    }

    /// Number of schedulable units, counting the implicit catch-all.
    /// 可调度单元的数量，包含隐式兜底单元。
    pub fn unit_count(&self) -> usize {
        match self {
            TestListRecord::Collection { labels } => labels.len() + 1,
            TestListRecord::Class { classes } => classes.len(),
        }
    }
}

/// Discriminates the four kinds of CI job.
/// 区分四种 CI 作业。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Collection,
    Uncollected,
    Class,
    Regular,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Collection => "collection",
            JobType::Uncollected => "uncollected",
            JobType::Class => "class",
            JobType::Regular => "regular",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One schedulable CI unit.
///
/// Identity fields are always serialized. Everything in `overrides` is only
/// present when it differs from the global default.
///
/// 一个可调度的 CI 单元。
/// 身份字段总是被序列化；`overrides` 中的字段仅在与全局默认值不同时出现。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    #[serde(rename = "type")]
    pub kind: JobType,
    pub project_name: String,
    pub name: String,
    pub shortname: String,
    pub test_project_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_class_name: Option<String>,
    #[serde(flatten)]
    pub overrides: JobOverrides,
}

/// The terminal artifact handed to the CI orchestrator.
/// 交给 CI 编排器的最终产物。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMatrix {
    pub include: Vec<JobEntry>,
}

impl JobMatrix {
    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }

    pub fn len(&self) -> usize {
        self.include.len()
    }

    /// Counts the entries of a given type.
    /// 统计给定类型的条目数量。
    pub fn count_of(&self, kind: JobType) -> usize {
        self.include.iter().filter(|e| e.kind == kind).count()
    }

    /// Serializes the matrix as pretty JSON with a trailing newline.
    /// 将矩阵序列化为带结尾换行的格式化 JSON。
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
