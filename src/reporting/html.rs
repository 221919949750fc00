//! # HTML Reporting Module / HTML 报告模块
//!
//! This module renders a static HTML overview of a job matrix: per-type counts
//! and a table of every entry with the fields it overrides.
//!
//! 此模块生成作业矩阵的静态 HTML 概览：各类型的数量，以及包含每个条目及其覆盖字段的表格。

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::models::{JobMatrix, JobType};
use crate::infra::fs::write_atomic;
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Generates an HTML report for a job matrix.
///
/// # Arguments / 参数
/// * `matrix` - The matrix to render / 要渲染的矩阵
/// * `output_path` - Where the HTML file is written / HTML 文件的写入位置
/// * `locale` - The locale to use for internationalization / 用于国际化的语言环境
///
/// # Errors / 错误
/// Returns an error if the file cannot be written.
/// 无法写入文件时返回错误。
pub fn generate_html_report(matrix: &JobMatrix, output_path: &Path, locale: &str) -> Result<()> {
    let html = render_html_report(matrix, locale)?;
    write_atomic(output_path, &html)
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))
}

/// Renders the report without touching the file system.
/// 渲染报告，不访问文件系统。
pub fn render_html_report(matrix: &JobMatrix, locale: &str) -> Result<String> {
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset='utf-8'><title>{}</title>",
        t!("html_report.title", locale = locale)
    ));
    html.push_str("<style>");
    html.push_str(HTML_STYLE);
    html.push_str("</style>");
    html.push_str("</head><body>");
    html.push_str(&format!(
        "<h1>{}</h1>",
        t!("html_report.main_header", locale = locale)
    ));
    html.push_str(&format!(
        "<div class='generated'>{}</div>",
        t!(
            "html_report.generated_at",
            locale = locale,
            time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )
    ));

    // Add summary statistics
    html.push_str("<div class='summary-container'>");
    html.push_str(&summary_item(
        matrix.len(),
        &t!("html_report.summary.total", locale = locale),
    ));
    for kind in [
        JobType::Collection,
        JobType::Uncollected,
        JobType::Class,
        JobType::Regular,
    ] {
        html.push_str(&summary_item(matrix.count_of(kind), kind.as_str()));
    }
    html.push_str("</div>");

    if matrix.is_empty() {
        html.push_str(&format!(
            "<p class='empty'>{}</p>",
            t!("matrix.empty", locale = locale)
        ));
    } else {
        html.push_str("<table><thead><tr>");
        for header in [
            t!("html_report.table.header.type", locale = locale),
            t!("html_report.table.header.project", locale = locale),
            t!("html_report.table.header.shortname", locale = locale),
            t!("html_report.table.header.overrides", locale = locale),
        ] {
            html.push_str(&format!("<th>{}</th>", header));
        }
        html.push_str("</tr></thead><tbody>");

        for entry in &matrix.include {
            let overrides = serde_json::to_string(&entry.overrides)
                .context("Failed to serialize job overrides")?;
            let overrides = if entry.overrides.is_empty() {
                String::new()
            } else {
                format!("<code>{}</code>", escape_html(&overrides))
            };
            html.push_str("<tr>");
            html.push_str(&format!(
                "<td class='type-cell type-{kind}'>{kind}</td>",
                kind = entry.kind
            ));
            html.push_str(&format!("<td>{}</td>", escape_html(&entry.project_name)));
            html.push_str(&format!("<td>{}</td>", escape_html(&entry.shortname)));
            html.push_str(&format!("<td>{}</td>", overrides));
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
    }

    html.push_str("</body></html>");
    Ok(html)
}

fn summary_item(count: usize, label: &str) -> String {
    format!(
        "<div class='summary-item'><span class='count'>{}</span><span class='label'>{}</span></div>",
        count,
        escape_html(label)
    )
}

/// Simple HTML escape function to replace special characters with their HTML entities
/// 简单的 HTML 转义函数，用 HTML 实体替换特殊字符
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
