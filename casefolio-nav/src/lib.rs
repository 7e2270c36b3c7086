//! Navigation state for the case-study pages: overlay open/close with hash
//! deep links, the page scroll lock, the featured pager, keyboard shortcuts
//! and the section scrollspy.
//!
//! Browser-facing concerns are ports ([`AddressBar`], [`ScrollPort`],
//! [`VisibilitySource`], [`AnalyticsSink`]) with in-memory implementations
//! for tests and for the command-line replay tool.

pub mod address_bar;
pub mod analytics;
pub mod config;
pub mod error;
pub mod hash;
pub mod keyboard;
pub mod machine;
pub mod pager;
pub mod route;
pub mod scroll_lock;
pub mod scrollspy;

pub use address_bar::{AddressBar, HistoryMode, Location, MemoryAddressBar, Navigator, ParamChange};
pub use analytics::{AnalyticsEvent, AnalyticsSink, RecordingAnalytics};
pub use config::NavConfig;
pub use error::NavError;
pub use hash::{HashParams, OVERLAY_PARAM};
pub use keyboard::{FocusTrap, Key, KeyEvent, Modifiers};
pub use machine::{KeyOutcome, NavigationMachine};
pub use pager::PagerPosition;
pub use route::{CASE_STUDY_PREFIX, Page, Route};
pub use scroll_lock::{LockStats, RecordingScrollPort, ScrollLock, ScrollLockGuard, ScrollPort};
pub use scrollspy::{Scrollspy, SectionBounds, VisibilitySource};
