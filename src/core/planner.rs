//! # Mode Selector Module / 模式选择模块
//!
//! This module decides how one project is split. Collection mode is chosen iff
//! any partition label survives the skip list; otherwise the project falls back
//! to class mode, which needs at least one discovered class.
//!
//! 此模块决定单个项目的拆分方式。当且仅当有分区标签在跳过列表过滤后保留时选择集合模式；
//! 否则回退到类模式，类模式至少需要一个已发现的类。

use std::collections::BTreeSet;

use crate::core::listing::{ClassNameMatcher, extract_class_names, filter_labels};
use crate::core::models::TestListRecord;
use crate::error::SplitError;

/// Chooses the split mode from already-filtered labels and discovered classes.
///
/// # Arguments
/// * `project` - Project name, used in error messages
/// * `labels` - Partition labels that survived the skip list
/// * `classes` - Class names discovered in the listing
/// * `prefix` - The class-name prefix, used in error messages
///
/// # Errors
/// `SplitError::NoClassesFound` when class mode is selected but no class was
/// discovered. A project must always yield at least one schedulable unit.
///
/// 根据已过滤的标签和已发现的类选择拆分模式。
/// 选择类模式但未发现任何类时返回 `SplitError::NoClassesFound`。
pub fn select_mode(
    project: &str,
    labels: BTreeSet<String>,
    classes: BTreeSet<String>,
    prefix: &str,
) -> Result<TestListRecord, SplitError> {
    if !labels.is_empty() {
        return Ok(TestListRecord::Collection { labels });
    }
    if classes.is_empty() {
        return Err(SplitError::NoClassesFound {
            project: project.to_string(),
            prefix: prefix.to_string(),
        });
    }
    Ok(TestListRecord::Class { classes })
}

/// Runs the pure part of one discovery pass: filter labels, extract classes,
/// select the mode.
///
/// # Arguments
/// * `project` - Project name
/// * `listing` - Raw listing lines
/// * `raw_labels` - Labels from the selected label source, before filtering
/// * `skip` - Labels to discard (case-sensitive)
/// * `matcher` - Class-name matcher for the project's prefix
///
/// 执行一次发现过程中的纯逻辑部分：过滤标签、提取类、选择模式。
pub fn plan_discovery<S: AsRef<str>>(
    project: &str,
    listing: &[S],
    raw_labels: BTreeSet<String>,
    skip: &[String],
    matcher: &ClassNameMatcher,
) -> Result<TestListRecord, SplitError> {
    let discarded = raw_labels.len();
    let labels = filter_labels(raw_labels, skip);
    let discarded = discarded - labels.len();
    if discarded > 0 {
        tracing::debug!(project, discarded, "partition labels removed by skip list");
    }

    let classes = if labels.is_empty() {
        extract_class_names(listing, matcher)
    } else {
        BTreeSet::new()
    };

    select_mode(project, labels, classes, matcher.prefix())
}
