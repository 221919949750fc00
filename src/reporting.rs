//! # Reporting Module / 报告模块
//!
//! This module handles the display of discovery decisions and job matrices.
//! It prints colorful, formatted summaries to the console with
//! internationalization support and renders a static HTML overview.
//!
//! 此模块处理发现决定和作业矩阵的展示。
//! 它在控制台打印彩色格式化摘要（支持国际化），并生成静态 HTML 概览。

pub mod console;
pub mod html;

// Re-export common reporting functions
pub use console::{print_discovery_summary, print_matrix_summary};
pub use html::generate_html_report;
