//! casefolio CLI
//!
//! Loads case-study content, normalizes it into the canonical schema, and
//! inspects the navigation state machine from the command line.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use log::{Level, LevelFilter};

use cli_types::{Cli, Commands, ConfigAction};
use commands::route::Replay;

pub(crate) use error::CliError;

/// Blank output line, routed through the logger like everything else.
pub(crate) fn log_blank() {
    log::info!("");
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    if !verbose {
        // Plain output: info lines are the command's output, other levels
        // carry a prefix.
        builder.format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        });
    }
    builder.init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let settings = settings::load_settings();
    let content = settings::resolve_content_dir(cli.content, &settings);
    let nav = &settings.navigation;

    let result = match cli.command {
        Commands::Check => commands::check::run_check(&content, nav).map(|clean| {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }),
        Commands::List => commands::list::run_list(&content, nav).map(|_| ExitCode::SUCCESS),
        Commands::Show { slug } => {
            commands::show::run_show(&content, nav, &slug).map(|_| ExitCode::SUCCESS)
        }
        Commands::Export { output } => {
            commands::export::run_export(&content, nav, output).map(|_| ExitCode::SUCCESS)
        }
        Commands::Metric { text } => {
            commands::metric::run_metric(&text);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Slug { titles } => {
            commands::slug::run_slug(&titles);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Route {
            path,
            hash,
            select,
            keys,
        } => commands::route::run_route(
            &content,
            nav,
            Replay {
                path: &path,
                hash: hash.as_deref(),
                select: select.as_deref(),
                keys: &keys,
            },
        )
        .map(|_| ExitCode::SUCCESS),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&content, &settings).map(|_| ExitCode::SUCCESS)
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(ExitCode::SUCCESS)
            }
            ConfigAction::Init { force } => {
                commands::config::run_config_init(force).map(|_| ExitCode::SUCCESS)
            }
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
