use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use casefolio_nav::NavConfig;

use crate::CliError;

use super::build_collection;

pub(crate) fn run_list(content: &Path, nav: &NavConfig) -> Result<(), CliError> {
    let report = build_collection(content, nav)?;
    let collection = &report.collection;

    if collection.is_empty() {
        log::info!(
            "{}",
            "No case studies.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{}:", nav.list_name).if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    let featured = collection.featured().len();
    for (i, cs) in collection.records().iter().enumerate() {
        log::info!(
            "  {:>2}. {} {}{}",
            i + 1,
            cs.slug.if_supports_color(Stdout, |t| t.bold()),
            cs.title().if_supports_color(Stdout, |t| t.cyan()),
            if i < featured {
                format!(" {}", "(featured)".if_supports_color(Stdout, |t| t.green()))
            } else {
                String::new()
            },
        );
    }
    Ok(())
}
