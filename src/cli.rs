// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};
use tracing_subscriber::EnvFilter;

use crate::{
    commands::{self, discover::DiscoverArgs, matrix::MatrixArgs},
    core::config::load_config_or_default,
    infra::t,
    resolve_locale,
};

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang=").map(str::to_string))
}

/// Installs the `tracing` subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("matrix-splitter")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("cli_verbose", locale = locale).to_string())
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("cli_config", locale = locale).to_string())
                .value_name("CONFIG")
                .default_value("Splitter.toml")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("discover")
                .about(t!("cmd_discover_about", locale = locale).to_string())
                .arg(
                    Arg::new("project-name")
                        .long("project-name")
                        .help(t!("arg_project_name", locale = locale).to_string())
                        .value_name("PROJECT")
                        .required(true)
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("listing")
                        .long("listing")
                        .help(t!("arg_listing", locale = locale).to_string())
                        .value_name("LISTING")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output-dir")
                        .short('o')
                        .long("output-dir")
                        .help(t!("arg_output_dir", locale = locale).to_string())
                        .value_name("OUTPUT_DIR")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("test-class-names-prefix")
                        .long("test-class-names-prefix")
                        .help(t!("arg_prefix", locale = locale).to_string())
                        .value_name("PREFIX")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("skip")
                        .long("skip")
                        .help(t!("arg_skip", locale = locale).to_string())
                        .value_name("LABELS")
                        .value_delimiter(';')
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("test-binary")
                        .long("test-binary")
                        .help(t!("arg_test_binary", locale = locale).to_string())
                        .value_name("BINARY")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("extractor")
                        .long("extractor")
                        .help(t!("arg_extractor", locale = locale).to_string())
                        .value_name("COMMAND")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("extractor-timeout")
                        .long("extractor-timeout")
                        .help(t!("arg_extractor_timeout", locale = locale).to_string())
                        .value_name("SECONDS")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("metadata")
                        .long("metadata")
                        .help(t!("arg_metadata", locale = locale).to_string())
                        .value_name("METADATA")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("matrix")
                .about(t!("cmd_matrix_about", locale = locale).to_string())
                .arg(
                    Arg::new("lists-dir")
                        .long("lists-dir")
                        .help(t!("arg_lists_dir", locale = locale).to_string())
                        .value_name("LISTS_DIR")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output-dir")
                        .short('o')
                        .long("output-dir")
                        .help(t!("arg_matrix_output_dir", locale = locale).to_string())
                        .value_name("OUTPUT_DIR")
                        .default_value(".")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("regular-projects-json")
                        .long("regular-projects-json")
                        .help(t!("arg_regular_projects_json", locale = locale).to_string())
                        .value_name("JSON")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("regular-projects")
                        .long("regular-projects")
                        .help(t!("arg_regular_projects", locale = locale).to_string())
                        .value_name("NAMES")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help(t!("arg_html", locale = locale).to_string())
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn discover_args(matches: &ArgMatches) -> DiscoverArgs {
    DiscoverArgs {
        project_name: matches
            .get_one::<String>("project-name")
            .cloned()
            .unwrap_or_default(),
        listing: matches
            .get_one::<PathBuf>("listing")
            .cloned()
            .unwrap_or_default(),
        output_dir: matches
            .get_one::<PathBuf>("output-dir")
            .cloned()
            .unwrap_or_default(),
        test_class_names_prefix: matches.get_one::<String>("test-class-names-prefix").cloned(),
        skip: matches
            .get_many::<String>("skip")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        test_binary: matches.get_one::<PathBuf>("test-binary").cloned(),
        extractor: matches.get_one::<String>("extractor").cloned(),
        extractor_timeout_secs: matches.get_one::<u64>("extractor-timeout").copied(),
        metadata: matches.get_one::<PathBuf>("metadata").cloned(),
    }
}

fn matrix_args(matches: &ArgMatches) -> MatrixArgs {
    MatrixArgs {
        lists_dir: matches
            .get_one::<PathBuf>("lists-dir")
            .cloned()
            .unwrap_or_default(),
        output_dir: matches
            .get_one::<PathBuf>("output-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        regular_projects_json: matches.get_one::<PathBuf>("regular-projects-json").cloned(),
        regular_projects: matches.get_one::<PathBuf>("regular-projects").cloned(),
        html: matches.get_one::<PathBuf>("html").cloned(),
    }
}

pub async fn run() -> Result<()> {
    // Pre-parse language so help texts are localized.
    let requested_language = pre_parse_language();
    let help_locale = resolve_locale(requested_language.as_deref());
    rust_i18n::set_locale(&help_locale);

    let matches = build_cli(&help_locale).get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("Splitter.toml"));

    match matches.subcommand() {
        Some(("discover", sub)) => {
            let config = load_config_or_default(&config_path)?;
            let locale = effective_locale(requested_language.as_deref(), &config_path, &config.language);
            commands::discover::execute(discover_args(sub), &config, &locale).await?;
        }
        Some(("matrix", sub)) => {
            let config = load_config_or_default(&config_path)?;
            let locale = effective_locale(requested_language.as_deref(), &config_path, &config.language);
            commands::matrix::execute(matrix_args(sub), &config, &locale)?;
        }
        Some(("init", sub)) => {
            let non_interactive = sub.get_flag("non-interactive");

            // Show language detection message if it was auto-detected
            if requested_language.is_none() && !non_interactive {
                println!(
                    "🌍 {}",
                    t!("system_language_detected", locale = &help_locale, lang = &help_locale)
                );
            }
            commands::init::run_init_wizard(&config_path, &help_locale, non_interactive)?;
        }
        _ => {
            // Clap has already printed help info.
        }
    }
    Ok(())
}

/// `--lang` wins, then the language of an existing config file, then the system locale.
fn effective_locale(requested: Option<&str>, config_path: &std::path::Path, configured: &str) -> String {
    match requested {
        Some(lang) => resolve_locale(Some(lang)),
        None if config_path.exists() => resolve_locale(Some(configured)),
        None => resolve_locale(None),
    }
}
