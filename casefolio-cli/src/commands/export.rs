use std::io::Write;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use casefolio_nav::NavConfig;

use crate::CliError;

use super::build_collection;

/// Write the canonical records as pretty JSON to `output`, or stdout.
pub(crate) fn run_export(
    content: &Path,
    nav: &NavConfig,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let report = build_collection(content, nav)?;
    let json = serde_json::to_string_pretty(report.collection.records())
        .map_err(|e| CliError::export(e.to_string()))?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let tmp = path.with_extension("json.tmp");
            std::fs::write(&tmp, format!("{json}\n"))?;
            std::fs::rename(&tmp, &path)?;
            log::info!(
                "{} Exported {} case studies to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                report.collection.len(),
                path.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    if !report.is_clean() {
        log::warn!(
            "{} records were excluded; run 'casefolio check' for details",
            report.excluded.len()
        );
    }
    Ok(())
}
