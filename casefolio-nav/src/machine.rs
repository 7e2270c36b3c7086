//! The navigation state machine.
//!
//! Overlay state is `Closed` or `Open(slug)`. The page, pager position and
//! active section are derived. Every transition writes the address bar and
//! commits internal state inside the same call, so the hash always matches
//! the committed overlay state by the time control returns.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

use casefolio_catalog::{CaseStudy, CaseStudyCollection};

use crate::address_bar::{AddressBar, HistoryMode, Location, Navigator};
use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::config::NavConfig;
use crate::error::NavError;
use crate::hash::OVERLAY_PARAM;
use crate::keyboard::{FocusTrap, Key, KeyEvent};
use crate::pager::PagerPosition;
use crate::route::{Page, Route};
use crate::scroll_lock::{ScrollLock, ScrollLockGuard};
use crate::scrollspy::VisibilitySource;

/// Whether a key event was consumed. Handled events suppress the browser
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

struct OpenOverlay {
    slug: String,
    focus: FocusTrap,
    _lock: ScrollLockGuard,
}

pub struct NavigationMachine<B: AddressBar> {
    collection: Arc<CaseStudyCollection>,
    navigator: Navigator<B>,
    lock: ScrollLock,
    analytics: Box<dyn AnalyticsSink>,
    config: NavConfig,
    page: Page,
    page_path: String,
    overlay: Option<OpenOverlay>,
    active_section: Option<String>,
    section_feed: Option<Receiver<Option<String>>>,
}

impl<B: AddressBar> NavigationMachine<B> {
    /// Mount on the current address. A `cs` hash parameter naming a known
    /// record opens the overlay before this returns, so no closed state is
    /// ever observable for a deep link.
    pub fn mount(
        collection: Arc<CaseStudyCollection>,
        bar: B,
        lock: ScrollLock,
        analytics: impl AnalyticsSink + 'static,
        config: NavConfig,
    ) -> Self {
        let mut machine = Self {
            collection,
            navigator: Navigator::new(bar),
            lock,
            analytics: Box::new(analytics),
            config,
            page: Page::Home,
            page_path: String::new(),
            overlay: None,
            active_section: None,
            section_feed: None,
        };
        machine.enter_route();
        machine.sync_overlay_with_hash();
        log::debug!(
            "Mounted at {} (page: {}, overlay: {:?})",
            machine.location(),
            machine.page,
            machine.overlay_slug()
        );
        machine
    }

    // ── Overlay ─────────────────────────────────────────────────────────────

    /// A record was picked from a list: report it, then open its overlay.
    pub fn select(&mut self, slug: &str) -> Result<(), NavError> {
        let record = self
            .collection
            .get(slug)
            .ok_or_else(|| NavError::unknown_slug(slug))?;
        self.analytics.emit(AnalyticsEvent::select_item(
            &self.config.list_id,
            &self.config.list_name,
            &record.slug,
            record.title(),
        ));
        self.open(slug)
    }

    /// Open the overlay for `slug`, closing any other overlay first.
    pub fn open(&mut self, slug: &str) -> Result<(), NavError> {
        if self.overlay_slug() == Some(slug) {
            return Ok(());
        }
        if !self.collection.contains(slug) {
            return Err(NavError::unknown_slug(slug));
        }

        self.overlay = None;
        match self.enter_overlay(slug) {
            Ok(overlay) => {
                self.navigator
                    .set_param(OVERLAY_PARAM, slug, HistoryMode::Push);
                self.overlay = Some(overlay);
                log::debug!("Opened overlay '{slug}'");
                Ok(())
            }
            Err(e) => {
                self.navigator
                    .clear_param(OVERLAY_PARAM, HistoryMode::Replace);
                Err(e)
            }
        }
    }

    /// Close the open overlay. Other hash parameters are left alone.
    /// Returns false if nothing was open.
    pub fn close(&mut self) -> bool {
        let Some(overlay) = self.overlay.take() else {
            return false;
        };
        self.navigator
            .clear_param(OVERLAY_PARAM, HistoryMode::Replace);
        log::debug!("Closed overlay '{}'", overlay.slug);
        true
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn overlay_slug(&self) -> Option<&str> {
        self.overlay.as_ref().map(|o| o.slug.as_str())
    }

    pub fn overlay_record(&self) -> Option<&CaseStudy> {
        self.overlay_slug().and_then(|slug| self.collection.get(slug))
    }

    /// Index of the focused overlay control; 0 is the close button.
    pub fn focused_control(&self) -> Option<usize> {
        self.overlay.as_ref().map(|o| o.focus.focused())
    }

    fn enter_overlay(&self, slug: &str) -> Result<OpenOverlay, NavError> {
        let record = self
            .collection
            .get(slug)
            .ok_or_else(|| NavError::unknown_slug(slug))?;
        let guard = self.lock.acquire(slug)?;
        Ok(OpenOverlay {
            slug: slug.to_string(),
            focus: FocusTrap::new(record.focusable_count()),
            _lock: guard,
        })
    }

    /// Bring the overlay in line with the `cs` parameter without writing
    /// history, except to drop a parameter that cannot be honored.
    fn sync_overlay_with_hash(&mut self) {
        let Some(wanted) = self.navigator.param(OVERLAY_PARAM) else {
            if let Some(overlay) = self.overlay.take() {
                log::debug!("Overlay '{}' closed by navigation", overlay.slug);
            }
            return;
        };
        if self.overlay_slug() == Some(wanted.as_str()) {
            return;
        }

        self.overlay = None;
        match self.enter_overlay(&wanted) {
            Ok(overlay) => {
                log::debug!("Restored overlay '{wanted}' from hash");
                self.overlay = Some(overlay);
            }
            Err(e) => {
                log::warn!("Ignoring #{OVERLAY_PARAM}={wanted}: {e}");
                self.navigator
                    .clear_param(OVERLAY_PARAM, HistoryMode::Replace);
            }
        }
    }

    // ── Routes and pager ────────────────────────────────────────────────────

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn location(&self) -> Location {
        self.navigator.location()
    }

    /// Go to another path. An open overlay is torn down first.
    pub fn navigate(&mut self, path: &str) {
        if let Some(overlay) = self.overlay.take() {
            log::debug!("Overlay '{}' closed by route change", overlay.slug);
        }
        self.navigator.navigate(path);
        self.enter_route();
    }

    /// The address bar changed underneath us (back, forward, manual edit).
    pub fn handle_location_change(&mut self) {
        self.navigator.location_changed();
        if self.navigator.location().page_path() != self.page_path {
            self.enter_route();
        }
        self.sync_overlay_with_hash();
    }

    fn enter_route(&mut self) {
        let location = self.navigator.location();
        self.page = Page::resolve(&Route::parse(&location.path), &self.collection);
        self.page_path = location.page_path();
        if let Page::NotFound { path } = &self.page {
            log::info!("No page for {path}");
        }
        self.analytics.emit(AnalyticsEvent::PageView {
            page_path: self.page_path.clone(),
        });
    }

    /// Position within the featured prefix, when on one of its detail pages.
    pub fn pager_position(&self) -> Option<PagerPosition> {
        self.page
            .slug()
            .and_then(|slug| PagerPosition::of(&self.collection, slug))
    }

    /// Go to the next featured record. No-op at the end.
    pub fn next(&mut self) -> bool {
        self.step(PagerPosition::next_index)
    }

    /// Go to the previous featured record. No-op at the start.
    pub fn prev(&mut self) -> bool {
        self.step(PagerPosition::prev_index)
    }

    fn step(&mut self, pick: fn(&PagerPosition) -> Option<usize>) -> bool {
        let Some(target) = self.pager_position().and_then(|p| pick(&p)) else {
            return false;
        };
        let path = Route::case_study(&self.collection.featured()[target].slug).path();
        self.navigate(&path);
        true
    }

    // ── Keyboard ────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, event: KeyEvent) -> KeyOutcome {
        match event.key {
            Key::Escape if self.close() => KeyOutcome::Handled,
            Key::Tab => match self.overlay.as_mut() {
                Some(overlay) => {
                    overlay.focus.advance(event.modifiers.shift);
                    KeyOutcome::Handled
                }
                None => KeyOutcome::Ignored,
            },
            Key::ArrowLeft | Key::ArrowRight => {
                if event.modifiers.any()
                    || event.in_text_input
                    || self.overlay.is_some()
                    || !self.page.is_detail()
                {
                    return KeyOutcome::Ignored;
                }
                let moved = if event.key == Key::ArrowLeft {
                    self.prev()
                } else {
                    self.next()
                };
                if moved {
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Ignored
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }

    // ── Sections ────────────────────────────────────────────────────────────

    /// Subscribe to a visibility source for the configured sections.
    pub fn attach_sections(&mut self, source: &mut dyn VisibilitySource) {
        self.section_feed = Some(source.observe_visibility(&self.config.sections));
        self.sync_active_section();
    }

    /// Drain pending visibility updates and return the latest active section.
    pub fn sync_active_section(&mut self) -> Option<&str> {
        let mut disconnected = false;
        if let Some(feed) = &self.section_feed {
            loop {
                match feed.try_recv() {
                    Ok(active) => self.active_section = active,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }
        if disconnected {
            self.section_feed = None;
        }
        self.active_section.as_deref()
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    // ── Lifecycle ───────────────────────────────────────────────────────────

    pub fn collection(&self) -> &CaseStudyCollection {
        &self.collection
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Tear down the view. Releases the scroll lock if an overlay is open
    /// and ends the section subscription.
    pub fn unmount(mut self) {
        if let Some(overlay) = self.overlay.take() {
            log::debug!("Overlay '{}' closed by unmount", overlay.slug);
        }
        self.section_feed = None;
    }
}

#[cfg(test)]
#[path = "tests/machine_tests.rs"]
mod tests;
