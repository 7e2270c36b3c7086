use serde::{Deserialize, Serialize};

use casefolio_catalog::DEFAULT_FEATURED_COUNT;

/// Navigation settings, loaded from the `[navigation]` table of the settings
/// file. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Length of the pager's navigable prefix.
    pub featured_count: usize,
    /// Section ids tracked by the scrollspy, in page order.
    pub sections: Vec<String>,
    /// Height of the persistent top bar, in pixels.
    pub overlay_offset: f64,
    /// List identifier reported with selection events.
    pub list_id: String,
    pub list_name: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            featured_count: DEFAULT_FEATURED_COUNT,
            sections: ["strengths", "experience", "projects", "contact"]
                .into_iter()
                .map(String::from)
                .collect(),
            overlay_offset: 64.0,
            list_id: "case_studies_home".to_string(),
            list_name: "Case Studies".to_string(),
        }
    }
}
