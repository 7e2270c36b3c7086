use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use casefolio_nav::NavConfig;

use crate::CliError;

use super::build_collection;

/// Build the collection and report exclusions. Returns whether every record
/// made it in.
pub(crate) fn run_check(content: &Path, nav: &NavConfig) -> Result<bool, CliError> {
    let report = build_collection(content, nav)?;

    log::info!(
        "{}",
        "Content check".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Directory: {}", content.display());
    crate::log_blank();

    log::info!(
        "  {} {} case studies normalized ({} featured)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.collection.len(),
        report.collection.featured().len(),
    );

    if report.is_clean() {
        return Ok(true);
    }

    log::info!(
        "  {} {} records excluded:",
        "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        report.excluded.len(),
    );
    for excluded in &report.excluded {
        log::info!(
            "    {}: {}",
            excluded.origin.if_supports_color(Stdout, |t| t.yellow()),
            excluded.error,
        );
    }
    Ok(false)
}
