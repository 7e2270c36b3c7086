use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{self, Settings};

/// Show the settings file location and the effective values.
pub(crate) fn run_config_show(content_dir: &Path, settings: &Settings) -> Result<(), CliError> {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "Casefolio Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("  Content dir:   {}", content_dir.display());
    crate::log_blank();

    let rendered = toml::to_string_pretty(settings).map_err(|e| CliError::config(e.to_string()))?;
    for line in rendered.lines() {
        log::info!("  {line}");
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings::settings_path().display());
}

/// Write a default settings file.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = settings::settings_path();
    if path.exists() && !force {
        log::warn!(
            "Settings file already exists at {} (use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }

    settings::save_settings_to(&path, &Settings::default())
        .map_err(|e| CliError::config(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!(
        "{} Wrote default settings to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
