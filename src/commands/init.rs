//! # Configuration Initialization Module / 配置初始化模块
//!
//! This module creates a `Splitter.toml` configuration file, either through an
//! interactive command-line wizard or with built-in values.
//!
//! 此模块通过交互式命令行向导或内置值创建 `Splitter.toml` 配置文件。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::{ExtractorConfig, SplitterConfig};
use crate::infra::t;

/// Runs the wizard that writes `config_path`.
///
/// With `non_interactive` the built-in configuration is written as is and an
/// existing file is overwritten without asking.
///
/// 运行写入 `config_path` 的向导。
/// 使用 `non_interactive` 时直接写入内置配置，且不询问即覆盖已有文件。
pub fn run_init_wizard(config_path: &Path, language: &str, non_interactive: bool) -> Result<()> {
    let theme = ColorfulTheme::default();

    if non_interactive {
        let config = SplitterConfig {
            language: language.to_string(),
            ..SplitterConfig::default()
        };
        return write_config(config_path, &config, language);
    }

    println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
    println!("{}", t!("init_wizard_description", locale = language));

    if config_path.exists() {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!(
                "init_overwrite_prompt",
                locale = language,
                path = config_path.display()
            ))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    let org_prefix: String = Input::with_theme(&theme)
        .with_prompt(t!("init_org_prefix_prompt", locale = language))
        .allow_empty(true)
        .interact_text()?;

    let skip_labels: String = Input::with_theme(&theme)
        .with_prompt(t!("init_skip_labels_prompt", locale = language))
        .allow_empty(true)
        .interact_text()?;

    let extractor: String = Input::with_theme(&theme)
        .with_prompt(t!("init_extractor_prompt", locale = language))
        .allow_empty(true)
        .interact_text()?;

    let config = SplitterConfig {
        language: language.to_string(),
        org_prefix: org_prefix.trim().to_string(),
        skip_labels: split_list(&skip_labels),
        extractor: ExtractorConfig {
            command: Some(extractor.trim().to_string()).filter(|c| !c.is_empty()),
            ..ExtractorConfig::default()
        },
        ..SplitterConfig::default()
    };

    write_config(config_path, &config, language)
}

/// Splits a `;` or `,` separated answer into trimmed, non-empty items.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split([';', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn write_config(path: &Path, config: &SplitterConfig, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(config)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    fs::write(path, toml_string)
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()).to_string())?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}
