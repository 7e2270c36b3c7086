//! Scrollspy: which tracked section is most visible right now.
//!
//! Geometry is pushed in by the host (scroll position, viewport height,
//! section bounds, top-bar height). Each push re-evaluates, and subscribers
//! receive the new active id only when it changes.
//!
//! The visible window is `[scroll_y + overlay_offset, scroll_y + viewport]`:
//! the strip hidden under the persistent top bar does not count, so a
//! section is "entered" once its top passes the bottom of the bar.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::config::NavConfig;

/// Vertical extent of a section in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Port for anything that can report the active section as a stream.
///
/// Dropping the receiver ends the subscription.
pub trait VisibilitySource {
    fn observe_visibility(&mut self, section_ids: &[String]) -> Receiver<Option<String>>;
}

#[derive(Debug)]
pub struct Scrollspy {
    sections: Vec<String>,
    bounds: HashMap<String, SectionBounds>,
    scroll_y: f64,
    viewport_height: f64,
    overlay_offset: f64,
    active: Option<String>,
    subscribers: Vec<Sender<Option<String>>>,
}

impl Scrollspy {
    pub fn new(sections: Vec<String>, overlay_offset: f64) -> Self {
        Self {
            sections,
            bounds: HashMap::new(),
            scroll_y: 0.0,
            viewport_height: 0.0,
            overlay_offset,
            active: None,
            subscribers: Vec::new(),
        }
    }

    pub fn from_config(config: &NavConfig) -> Self {
        Self::new(config.sections.clone(), config.overlay_offset)
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
        self.evaluate();
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
        self.evaluate();
    }

    /// Layout of one section changed (first render, content resize).
    pub fn set_section_bounds(&mut self, id: &str, bounds: SectionBounds) {
        self.bounds.insert(id.to_string(), bounds);
        self.evaluate();
    }

    /// The top bar changed height.
    pub fn set_overlay_offset(&mut self, offset: f64) {
        self.overlay_offset = offset;
        self.evaluate();
    }

    /// Fraction of the section inside the visible window, in `0.0..=1.0`.
    /// Sections without bounds, or with no height, score zero.
    pub fn intersection_ratio(&self, id: &str) -> f64 {
        let Some(b) = self.bounds.get(id) else {
            return 0.0;
        };
        if b.height <= 0.0 {
            return 0.0;
        }
        let window_top = self.scroll_y + self.overlay_offset;
        let window_bottom = self.scroll_y + self.viewport_height;
        let overlap = b.bottom().min(window_bottom) - b.top.max(window_top);
        (overlap.max(0.0) / b.height).min(1.0)
    }

    /// Highest ratio above zero; the earlier section wins a tie.
    fn most_visible(&self) -> Option<String> {
        let mut best: Option<(&str, f64)> = None;
        for id in &self.sections {
            let ratio = self.intersection_ratio(id);
            if ratio > 0.0 && best.is_none_or(|(_, r)| ratio > r) {
                best = Some((id.as_str(), ratio));
            }
        }
        best.map(|(id, _)| id.to_string())
    }

    /// Subscribe to active-id changes. The current value is sent immediately.
    pub fn subscribe(&mut self) -> Receiver<Option<String>> {
        let (tx, rx) = mpsc::channel();
        if tx.send(self.active.clone()).is_ok() {
            self.subscribers.push(tx);
        }
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn evaluate(&mut self) {
        let next = self.most_visible();
        if next == self.active {
            return;
        }
        log::trace!("Active section: {:?} -> {:?}", self.active, next);
        self.active = next;
        let active = &self.active;
        self.subscribers.retain(|tx| tx.send(active.clone()).is_ok());
    }
}

impl VisibilitySource for Scrollspy {
    fn observe_visibility(&mut self, section_ids: &[String]) -> Receiver<Option<String>> {
        if self.sections != section_ids {
            self.sections = section_ids.to_vec();
            self.evaluate();
        }
        self.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/scrollspy_tests.rs"]
mod tests;
