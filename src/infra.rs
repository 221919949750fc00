//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Matrix Splitter,
//! including external process capture, file system operations, and i18n support.
//!
//! 此模块为 Matrix Splitter 提供基础设施服务，
//! 包括外部进程输出捕获、文件系统操作和国际化支持。

pub mod command;
pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
