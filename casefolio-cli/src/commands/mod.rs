pub(crate) mod check;
pub(crate) mod config;
pub(crate) mod export;
pub(crate) mod list;
pub(crate) mod metric;
pub(crate) mod route;
pub(crate) mod show;
pub(crate) mod slug;

use std::path::Path;

use casefolio_catalog::BuildReport;
use casefolio_nav::NavConfig;

use crate::CliError;

/// Load and normalize the content directory.
pub(crate) fn build_collection(content: &Path, nav: &NavConfig) -> Result<BuildReport, CliError> {
    log::debug!("Loading content from {}", content.display());
    let report = casefolio_catalog::load_collection(content, nav.featured_count)
        .map_err(|e| CliError::content(e.to_string()))?;
    if report.collection.is_empty() && report.excluded.is_empty() {
        log::warn!("No case studies found in {}", content.display());
    }
    Ok(report)
}
