//! # Matrix Command Module / 矩阵命令模块
//!
//! This module implements the `matrix` command, which combines every list file
//! and the regular projects into `combined-tests-matrix.json`.
//!
//! 此模块实现 `matrix` 命令，将所有列表文件和常规项目合并为 `combined-tests-matrix.json`。

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

use crate::{
    core::{
        config::SplitterConfig,
        matrix::MatrixBuilder,
        metadata::GlobalDefaults,
        models::JobMatrix,
        projects::{load_regular_projects, load_split_projects},
    },
    infra::{fs::write_atomic, t},
    reporting::{console::print_matrix_summary, html::generate_html_report},
};

/// File name of the combined matrix.
pub const MATRIX_FILE_NAME: &str = "combined-tests-matrix.json";

#[derive(Debug, Clone, Default)]
pub struct MatrixArgs {
    /// Directory holding `<project>.tests.list` files / 存放列表文件的目录
    pub lists_dir: PathBuf,
    /// Directory receiving the matrix file / 接收矩阵文件的目录
    pub output_dir: PathBuf,
    pub regular_projects_json: Option<PathBuf>,
    pub regular_projects: Option<PathBuf>,
    pub html: Option<PathBuf>,
}

/// Executes the matrix command.
///
/// # Returns
/// The matrix that was written.
///
/// # Errors
/// Fails when the lists directory is absent. An empty directory produces an
/// empty matrix.
///
/// 执行 matrix 命令。列表目录不存在时失败；空目录会生成空矩阵。
pub fn execute(args: MatrixArgs, config: &SplitterConfig, locale: &str) -> Result<JobMatrix> {
    let defaults = GlobalDefaults::default();
    let naming = config.naming();

    println!(
        "{}",
        t!("matrix.loading_lists", locale = locale, path = args.lists_dir.display())
    );
    let split = load_split_projects(&args.lists_dir, &defaults)?;
    if split.is_empty() {
        println!(
            "{}",
            t!("matrix.no_lists", locale = locale, path = args.lists_dir.display()).yellow()
        );
    }

    let regular = load_regular_projects(
        args.regular_projects_json.as_deref(),
        args.regular_projects.as_deref(),
        &naming,
        &defaults,
    )?;

    let matrix = MatrixBuilder::new(&defaults, &naming).build(&split, &regular);

    let output_path = write_matrix(&matrix, &args.output_dir)?;
    println!(
        "{}",
        t!("matrix.wrote_matrix", locale = locale, path = output_path.display()).green()
    );

    print_matrix_summary(&matrix, locale);

    if let Some(report_path) = &args.html {
        println!(
            "\n{}",
            t!("matrix.html_report", locale = locale, path = report_path.display())
        );
        if let Err(e) = generate_html_report(&matrix, report_path, locale) {
            eprintln!("{} {:#}", t!("matrix.html_failed", locale = locale).red(), e);
        }
    }

    Ok(matrix)
}

/// Writes the matrix JSON into `output_dir` and returns the file path.
pub fn write_matrix(matrix: &JobMatrix, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(MATRIX_FILE_NAME);
    let json = matrix
        .to_json_pretty()
        .context("Failed to serialize job matrix")?;
    write_atomic(&path, &json)?;
    Ok(path)
}
