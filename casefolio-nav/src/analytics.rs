//! Analytics collaborator port.
//!
//! Events are handed off and forgotten: [`AnalyticsSink::emit`] returns
//! nothing, and navigation never waits on or retries delivery.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedItem {
    pub item_id: String,
    pub item_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    /// A record was picked from a list.
    SelectItem {
        item_list_id: String,
        item_list_name: String,
        items: Vec<SelectedItem>,
    },
    /// The route changed. `page_path` includes the query string.
    PageView { page_path: String },
}

impl AnalyticsEvent {
    pub fn select_item(list_id: &str, list_name: &str, slug: &str, title: &str) -> Self {
        Self::SelectItem {
            item_list_id: list_id.to_string(),
            item_list_name: list_name.to_string(),
            items: vec![SelectedItem {
                item_id: slug.to_string(),
                item_name: title.to_string(),
            }],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectItem { .. } => "select_item",
            Self::PageView { .. } => "page_view",
        }
    }
}

pub trait AnalyticsSink {
    fn emit(&self, event: AnalyticsEvent);
}

/// Keeps every event in memory. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalytics {
    events: Rc<RefCell<Vec<AnalyticsEvent>>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.borrow().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(AnalyticsEvent::name).collect()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn emit(&self, event: AnalyticsEvent) {
        log::debug!("analytics: {event:?}");
        self.events.borrow_mut().push(event);
    }
}
