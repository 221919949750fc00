//! # Partition Label Sources / 分区标签来源
//!
//! A project's partition labels come from exactly one source per run: either an
//! external extraction tool that inspects the compiled test binary, or banner
//! lines embedded in the raw listing. The source is chosen by availability.
//!
//! 项目的分区标签每次运行只来自一个来源：检查已编译测试程序的外部提取工具，
//! 或嵌入在原始测试列表中的横幅行。来源根据可用性选择。

use anyhow::{Context, Result, anyhow, bail};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::listing::extract_banner_labels;
use crate::error::SplitError;
use crate::infra::command;

/// Placeholder replaced by the test binary path in extractor commands.
pub const BINARY_PLACEHOLDER: &str = "{binary}";

/// Runs an external tool against the compiled binary; one label per stdout line.
/// 对已编译程序运行外部工具；stdout 每行一个标签。
#[derive(Debug, Clone)]
pub struct ExternalToolSource {
    pub command: String,
    pub binary: PathBuf,
    pub timeout: Duration,
}

/// Reads `Collection: <label>` banner lines from the listing itself.
/// 从测试列表本身读取 `Collection: <label>` 横幅行。
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineBannerSource;

#[derive(Debug, Clone)]
pub enum LabelSource {
    ExternalTool(ExternalToolSource),
    InlineBanner(InlineBannerSource),
}

impl LabelSource {
    /// Picks the external tool when a command is configured and the binary
    /// exists, otherwise falls back to inline banners.
    ///
    /// 配置了命令且测试程序存在时选择外部工具，否则回退到内联横幅。
    pub fn select(command: Option<&str>, binary: Option<&Path>, timeout: Duration) -> Self {
        match (command.map(str::trim), binary) {
            (Some(command), Some(binary)) if !command.is_empty() && binary.is_file() => {
                LabelSource::ExternalTool(ExternalToolSource {
                    command: command.to_string(),
                    binary: binary.to_path_buf(),
                    timeout,
                })
            }
            _ => LabelSource::InlineBanner(InlineBannerSource),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LabelSource::ExternalTool(_) => "external-tool",
            LabelSource::InlineBanner(_) => "inline-banner",
        }
    }

    /// Collects the raw (unfiltered) label set.
    ///
    /// Extractor failures are not fatal: they are logged as warnings and yield
    /// an empty set, which routes mode selection to class mode.
    ///
    /// 收集原始（未过滤）标签集合。提取工具失败不是致命错误：记录警告并返回空集合，
    /// 从而使模式选择进入类模式。
    pub async fn collect<S: AsRef<str>>(&self, project: &str, listing: &[S]) -> BTreeSet<String> {
        match self {
            LabelSource::InlineBanner(_) => extract_banner_labels(listing),
            LabelSource::ExternalTool(tool) => match tool.extract(project).await {
                Ok(labels) => {
                    if labels.is_empty() {
                        tracing::warn!(project, "partition extractor produced no labels");
                    }
                    labels
                }
                Err(e) => {
                    tracing::warn!(project, "{e}; continuing without partition labels");
                    BTreeSet::new()
                }
            },
        }
    }
}

impl ExternalToolSource {
    /// Runs the tool, bounded by `timeout`.
    pub async fn extract(&self, project: &str) -> Result<BTreeSet<String>, SplitError> {
        let failure = |reason: String| SplitError::ExtractorFailed {
            project: project.to_string(),
            reason,
        };

        let argv = self.argv().map_err(|e| failure(format!("{e:#}")))?;
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| failure("empty extractor command".to_string()))?;

        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args).kill_on_drop(true);
        tracing::debug!(project, command = ?argv, "running partition extractor");

        let output = tokio::time::timeout(self.timeout, command::spawn_and_capture(cmd))
            .await
            .map_err(|_| failure(format!("timed out after {}s", self.timeout.as_secs())))?
            .map_err(|e| failure(format!("failed to run '{program}': {e}")))?;

        if !output.status.success() {
            let stderr = output.stderr.trim();
            return Err(failure(format!(
                "'{program}' exited with {}{}",
                output.status,
                if stderr.is_empty() {
                    String::new()
                } else {
                    format!(": {stderr}")
                }
            )));
        }

        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Expands and splits the command line, then substitutes the binary path.
    /// Arguments containing `{binary}` get the path spliced in; without a
    /// placeholder the path is appended as the last argument.
    ///
    /// 展开并拆分命令行，然后替换测试程序路径。
    /// 含 `{binary}` 的参数会被替换；没有占位符时路径作为最后一个参数追加。
    pub fn argv(&self) -> Result<Vec<String>> {
        let expanded = shellexpand::full(&self.command)
            .with_context(|| format!("Failed to expand command: {}", self.command))?
            .to_string();
        let mut parts = shlex::split(&expanded)
            .ok_or_else(|| anyhow!("Failed to parse command: {expanded}"))?;
        if parts.is_empty() {
            bail!("Empty command after parsing.");
        }

        let binary = self.binary.to_string_lossy();
        let mut substituted = false;
        for part in parts.iter_mut() {
            if part.contains(BINARY_PLACEHOLDER) {
                *part = part.replace(BINARY_PLACEHOLDER, &binary);
                substituted = true;
            }
        }
        if !substituted {
            parts.push(binary.into_owned());
        }
        Ok(parts)
    }
}
