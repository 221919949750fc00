//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints discovery decisions and matrix summaries to the console.
//! Output is colorized and localized.
//!
//! 此模块在控制台打印发现决定和矩阵摘要，输出带颜色并支持国际化。

use colored::*;

use crate::core::models::{JobEntry, JobMatrix, JobType, TestListRecord};
use crate::infra::t;

/// Prints the outcome of one discovery pass.
///
/// 打印一次发现过程的结果。
///
/// # Output Format / 输出格式
/// ```text
/// Project Org.Foo.Tests: collection mode, 2 job(s)
///   - collection:Smoke
///   - uncollected:*
/// ```
pub fn print_discovery_summary(project: &str, record: &TestListRecord, locale: &str) {
    println!(
        "{}",
        t!(
            "discover.summary",
            locale = locale,
            project = project.yellow(),
            mode = record.mode().to_string().cyan(),
            count = record.unit_count()
        )
        .bold()
    );
    for line in record.to_list_string().lines() {
        println!("  - {}", line);
    }
}

/// Prints a formatted table of the emitted matrix entries.
///
/// 在控制台打印输出矩阵条目的格式化表格。
///
/// # Output Format / 输出格式
/// ```text
/// --- Job Matrix ---
///   - collection  | Foo-Smoke                                | 30m
///   - uncollected | Foo-uncollected                          | 30m
///   - regular     | Bar                                      |
/// ```
pub fn print_matrix_summary(matrix: &JobMatrix, locale: &str) {
    println!("\n{}", t!("matrix.summary_banner", locale = locale).bold());

    if matrix.is_empty() {
        println!("  {}", t!("matrix.empty", locale = locale).dimmed());
        return;
    }

    for entry in &matrix.include {
        println!(
            "  - {:<11} | {:<40} | {}",
            colored_kind(entry),
            entry.shortname,
            entry.overrides.test_session_timeout.as_deref().unwrap_or("")
        );
    }

    println!(
        "\n{}",
        t!(
            "matrix.summary_counts",
            locale = locale,
            total = matrix.len(),
            collection = matrix.count_of(JobType::Collection),
            uncollected = matrix.count_of(JobType::Uncollected),
            class = matrix.count_of(JobType::Class),
            regular = matrix.count_of(JobType::Regular)
        )
    );
}

fn colored_kind(entry: &JobEntry) -> ColoredString {
    let kind = entry.kind.as_str();
    match entry.kind {
        JobType::Collection => kind.blue(),
        JobType::Uncollected => kind.yellow(),
        JobType::Class => kind.magenta(),
        JobType::Regular => kind.green(),
    }
}
