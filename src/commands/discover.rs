//! # Discover Command Module / 发现命令模块
//!
//! This module implements the `discover` command: one discovery pass for one
//! compiled test binary. It reads the raw listing, collects partition labels
//! from the available source, selects the split mode and writes the
//! `<project>.tests.list` and `<project>.tests.metadata.json` hand-off files.
//!
//! 此模块实现 `discover` 命令：针对单个已编译测试程序执行一次发现过程。
//! 它读取原始测试列表，从可用来源收集分区标签，选择拆分模式，
//! 并写出 `<project>.tests.list` 和 `<project>.tests.metadata.json` 交接文件。

use anyhow::{Context, Result};
use colored::*;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{
    core::{
        config::SplitterConfig,
        labels::LabelSource,
        list_file::{metadata_file_path, write_list_file},
        listing::{ClassNameMatcher, read_listing},
        metadata::ProjectMetadata,
        models::TestListRecord,
        planner::plan_discovery,
    },
    infra::{fs::write_atomic, t},
    reporting::console::print_discovery_summary,
};

/// Arguments of one discovery pass.
/// 一次发现过程的参数。
#[derive(Debug, Clone, Default)]
pub struct DiscoverArgs {
    /// Project name; names the output files / 项目名称，用于命名输出文件
    pub project_name: String,
    /// Raw test listing, one test per line / 原始测试列表，每行一个测试
    pub listing: PathBuf,
    /// Directory receiving the list and metadata files / 接收列表和元数据文件的目录
    pub output_dir: PathBuf,
    pub test_class_names_prefix: Option<String>,
    /// Extra labels to skip, on top of the configured ones / 在配置之外额外跳过的标签
    pub skip: Vec<String>,
    pub test_binary: Option<PathBuf>,
    pub extractor: Option<String>,
    pub extractor_timeout_secs: Option<u64>,
    /// Input metadata record forwarded next to the list file / 随列表文件转发的输入元数据记录
    pub metadata: Option<PathBuf>,
}

/// Executes the discover command.
///
/// # Returns
/// The record that was written.
///
/// # Errors
/// Fails without writing anything when the listing is missing or when class
/// mode is selected but no class was discovered.
///
/// 执行 discover 命令。列表缺失或选择类模式但未发现任何类时，不写入任何文件并失败。
pub async fn execute(
    args: DiscoverArgs,
    config: &SplitterConfig,
    locale: &str,
) -> Result<TestListRecord> {
    let project = args.project_name.trim().to_string();
    anyhow::ensure!(!project.is_empty(), "project name must not be empty");

    println!(
        "{}",
        t!("discover.loading_listing", locale = locale, path = args.listing.display())
    );
    let listing = read_listing(&args.listing, &project)?;

    let (mut metadata_map, metadata) = match &args.metadata {
        Some(path) => load_metadata_input(path, &project),
        None => (Map::new(), None),
    };

    let prefix = args
        .test_class_names_prefix
        .clone()
        .or_else(|| metadata.and_then(|m| m.test_class_names_prefix))
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| project.clone());
    let matcher = ClassNameMatcher::new(&prefix)?;

    let timeout = Duration::from_secs(
        args.extractor_timeout_secs
            .unwrap_or(config.extractor.timeout_secs),
    );
    let command = args.extractor.as_deref().or(config.extractor.command.as_deref());
    let source = LabelSource::select(command, args.test_binary.as_deref(), timeout);
    if command.is_some() && matches!(source, LabelSource::InlineBanner(_)) {
        tracing::warn!(
            project = %project,
            binary = ?args.test_binary,
            "partition extractor configured but test binary is unavailable; using inline banners"
        );
    }
    println!(
        "{}",
        t!("discover.label_source", locale = locale, source = source.name().cyan())
    );

    let raw_labels = source.collect(&project, &listing).await;

    let mut skip = config.skip_labels.clone();
    skip.extend(args.skip.iter().cloned());

    let record = plan_discovery(&project, &listing, raw_labels, &skip, &matcher)?;

    let list_path = write_list_file(&args.output_dir, &project, &record)?;
    println!(
        "{}",
        t!("discover.wrote_list", locale = locale, path = list_path.display()).green()
    );

    metadata_map.insert("projectName".to_string(), Value::String(project.clone()));
    metadata_map.insert(
        "testClassNamesPrefix".to_string(),
        Value::String(matcher.prefix().to_string()),
    );
    let metadata_path = metadata_file_path(&args.output_dir, &project);
    let mut metadata_json = serde_json::to_string_pretty(&Value::Object(metadata_map))
        .context("Failed to serialize project metadata")?;
    metadata_json.push('\n');
    write_atomic(&metadata_path, &metadata_json)
        .with_context(|| format!("Failed to write metadata for project '{project}'"))?;
    println!(
        "{}",
        t!("discover.wrote_metadata", locale = locale, path = metadata_path.display()).green()
    );

    print_discovery_summary(&project, &record, locale);
    Ok(record)
}

/// Reads the input metadata record as a raw JSON object (so unknown keys are
/// forwarded) and as a typed record. Missing or malformed input degrades to
/// an empty record; malformed input is reported.
///
/// 以原始 JSON 对象（保留未知键）和类型化记录两种形式读取输入元数据。
/// 缺失或格式错误时降级为空记录；格式错误会被报告。
fn load_metadata_input(path: &Path, project: &str) -> (Map<String, Value>, Option<ProjectMetadata>) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(project, path = %path.display(), "no input metadata, using defaults");
            return (Map::new(), None);
        }
        Err(e) => {
            tracing::warn!(project, path = %path.display(), "cannot read metadata: {e}; using defaults");
            return (Map::new(), None);
        }
    };

    let map = match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            tracing::warn!(project, path = %path.display(), "metadata is not a JSON object; using defaults");
            return (Map::new(), None);
        }
        Err(e) => {
            tracing::warn!(project, path = %path.display(), "malformed metadata: {e}; using defaults");
            return (Map::new(), None);
        }
    };

    match ProjectMetadata::from_json(project, &content) {
        Ok(record) => (map, Some(record)),
        Err(e) => {
            tracing::warn!(project, path = %path.display(), "{e}; using defaults");
            (Map::new(), None)
        }
    }
}
