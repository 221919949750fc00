//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Matrix Splitter: listing
//! classification, partition label sources, mode selection, the intermediate
//! list file, metadata resolution and matrix building.
//!
//! 此模块包含 Matrix Splitter 的核心功能：测试列表分类、分区标签来源、
//! 模式选择、中间列表文件、元数据解析和矩阵构建。

pub mod config;
pub mod filter;
pub mod labels;
pub mod list_file;
pub mod listing;
pub mod matrix;
pub mod metadata;
pub mod models;
pub mod planner;
pub mod projects;
pub mod sparse;

// Re-exports
pub use config::SplitterConfig;
pub use matrix::MatrixBuilder;
pub use models::{JobEntry, JobMatrix, SplitMode, TestListRecord};
pub use planner::plan_discovery;
