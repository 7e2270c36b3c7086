use std::sync::Arc;

use casefolio_catalog::CaseStudyCollection;
use casefolio_catalog::source::{LegacyRecord, SourceRecord};
use casefolio_nav::{
    AddressBar, AnalyticsEvent, Key, KeyEvent, KeyOutcome, LockStats, MemoryAddressBar, NavConfig,
    NavigationMachine, Page, RecordingAnalytics, RecordingScrollPort, ScrollLock,
};

fn collection(titles: &[&str], featured: usize) -> Arc<CaseStudyCollection> {
    let report = CaseStudyCollection::build(
        titles.iter().map(|t| {
            (
                format!("{t}.yaml"),
                SourceRecord::Legacy(LegacyRecord {
                    title: Some(t.to_string()),
                    problem: Some("It was hard.".to_string()),
                    ..Default::default()
                }),
            )
        }),
        featured,
    );
    assert!(report.is_clean());
    Arc::new(report.collection)
}

struct Harness {
    machine: NavigationMachine<MemoryAddressBar>,
    bar: MemoryAddressBar,
    lock: ScrollLock,
    port: RecordingScrollPort,
    analytics: RecordingAnalytics,
}

fn harness_with(address: &str, featured: usize) -> Harness {
    let bar = MemoryAddressBar::at(address);
    let port = RecordingScrollPort::new();
    let lock = ScrollLock::new(port.clone());
    let analytics = RecordingAnalytics::new();
    let machine = NavigationMachine::mount(
        collection(&["Curb Appeal", "Pricing Page", "Onboarding", "Search"], featured),
        bar.clone(),
        lock.clone(),
        analytics.clone(),
        NavConfig::default(),
    );
    Harness {
        machine,
        bar,
        lock,
        port,
        analytics,
    }
}

fn harness(address: &str) -> Harness {
    harness_with(address, 3)
}

// ── Deep links ──────────────────────────────────────────────────────────────

#[test]
fn opening_writes_slug_to_hash() {
    let mut h = harness("/");
    h.machine.select("curb-appeal").unwrap();
    assert!(h.machine.is_overlay_open());
    assert_eq!(h.bar.location().hash, "#cs=curb-appeal");
}

#[test]
fn reload_with_hash_restores_open_state() {
    let mut h = harness("/");
    h.machine.select("pricing-page").unwrap();
    let address = h.bar.location().to_string();
    h.machine.unmount();

    let reloaded = harness(&address);
    assert_eq!(reloaded.machine.overlay_slug(), Some("pricing-page"));
    assert!(reloaded.lock.is_held());
    // Lock taken once, never released: no closed frame in between.
    assert_eq!(reloaded.port.toggles(), vec![false]);
    assert_eq!(reloaded.bar.history_len(), 1);
}

#[test]
fn close_removes_only_overlay_param() {
    let mut h = harness("/?utm=mail#ref=home&tab=2");
    h.machine.open("onboarding").unwrap();
    assert_eq!(h.bar.location().hash, "#ref=home&tab=2&cs=onboarding");

    assert!(h.machine.close());
    let loc = h.bar.location();
    assert_eq!(loc.hash, "#ref=home&tab=2");
    assert_eq!(loc.query, "?utm=mail");
    assert!(!h.machine.close());
}

#[test]
fn close_leaves_other_hash_text_verbatim() {
    let mut h = harness("/#intro&q=a%20b&t=~x");
    let before = h.bar.location().hash;

    h.machine.open("curb-appeal").unwrap();
    assert_eq!(h.bar.location().hash, "#intro&q=a%20b&t=~x&cs=curb-appeal");

    assert!(h.machine.close());
    assert_eq!(h.bar.location().hash, before);
}

#[test]
fn hash_matches_state_after_every_transition() {
    let mut h = harness("/");
    let check = |h: &Harness| {
        let hash_slug = casefolio_nav::HashParams::parse(&h.bar.location().hash)
            .get("cs")
            .map(str::to_string);
        assert_eq!(hash_slug.as_deref(), h.machine.overlay_slug());
    };

    h.machine.open("curb-appeal").unwrap();
    check(&h);
    h.machine.open("search").unwrap();
    check(&h);
    h.machine.handle_key(KeyEvent::new(Key::Escape));
    check(&h);
    let _ = h.machine.open("missing");
    check(&h);
}

// ── Scroll lock ─────────────────────────────────────────────────────────────

fn assert_balanced(h: &Harness, opens: u64) {
    assert!(!h.lock.is_held());
    assert_eq!(
        h.lock.stats(),
        LockStats {
            acquisitions: opens,
            releases: opens
        }
    );
    assert!(h.port.background_enabled());
}

#[test]
fn lock_released_on_close() {
    let mut h = harness("/");
    h.machine.open("curb-appeal").unwrap();
    assert!(h.lock.is_held());
    assert!(!h.port.background_enabled());
    h.machine.close();
    assert_balanced(&h, 1);
}

#[test]
fn lock_released_on_escape() {
    let mut h = harness("/");
    h.machine.open("curb-appeal").unwrap();
    assert_eq!(h.machine.handle_key(KeyEvent::new(Key::Escape)), KeyOutcome::Handled);
    assert!(!h.machine.is_overlay_open());
    assert_balanced(&h, 1);
}

#[test]
fn lock_released_on_back_navigation() {
    let mut h = harness("/#ref=home");
    h.machine.select("curb-appeal").unwrap();
    assert!(h.bar.back());
    h.machine.handle_location_change();
    assert!(!h.machine.is_overlay_open());
    assert_eq!(h.bar.location().hash, "#ref=home");
    assert_balanced(&h, 1);
}

#[test]
fn forward_navigation_reopens() {
    let mut h = harness("/");
    h.machine.select("curb-appeal").unwrap();
    h.bar.back();
    h.machine.handle_location_change();
    h.bar.forward();
    h.machine.handle_location_change();
    assert_eq!(h.machine.overlay_slug(), Some("curb-appeal"));
    assert!(h.lock.is_held());
}

#[test]
fn lock_released_on_teardown() {
    let mut h = harness("/");
    h.machine.open("curb-appeal").unwrap();
    let Harness {
        machine, lock, port, ..
    } = h;
    drop(machine);
    assert!(!lock.is_held());
    assert_eq!(lock.stats().releases, 1);
    assert!(port.background_enabled());
}

#[test]
fn lock_released_on_unmount() {
    let mut h = harness("/");
    h.machine.open("curb-appeal").unwrap();
    let lock = h.lock.clone();
    let port = h.port.clone();
    h.machine.unmount();
    assert!(!lock.is_held());
    assert_eq!(lock.stats(), LockStats { acquisitions: 1, releases: 1 });
    assert_eq!(port.toggles(), vec![false, true]);
}

#[test]
fn switching_overlays_is_close_then_open() {
    let mut h = harness("/");
    h.machine.open("curb-appeal").unwrap();
    h.machine.open("search").unwrap();
    assert_eq!(h.lock.holder().as_deref(), Some("search"));
    assert_eq!(h.port.toggles(), vec![false, true, false]);
    h.machine.close();
    assert_balanced(&h, 2);
}

// ── Pager and routes ────────────────────────────────────────────────────────

#[test]
fn pager_boundaries() {
    let mut h = harness("/case-studies/curb-appeal");
    let pos = h.machine.pager_position().unwrap();
    assert_eq!((pos.index, pos.len), (0, 3));
    assert!(!pos.has_prev());
    assert!(!h.machine.prev());
    assert_eq!(h.machine.page().slug(), Some("curb-appeal"));

    h.machine.navigate("/case-studies/onboarding");
    let pos = h.machine.pager_position().unwrap();
    assert_eq!(pos.index, 2);
    assert!(!pos.has_next());
    assert!(!h.machine.next());
}

#[test]
fn next_then_prev_returns_to_start() {
    let mut h = harness("/case-studies/pricing-page");
    let start = h.machine.pager_position().unwrap().index;
    assert!(h.machine.next());
    assert_eq!(h.bar.location().path, "/case-studies/onboarding");
    assert!(h.machine.prev());
    assert_eq!(h.machine.pager_position().unwrap().index, start);
}

#[test]
fn records_outside_featured_prefix_have_no_pager() {
    let mut h = harness("/case-studies/search");
    assert!(h.machine.page().is_detail());
    assert_eq!(h.machine.pager_position(), None);
    assert!(!h.machine.next());
    assert_eq!(
        h.machine.handle_key(KeyEvent::new(Key::ArrowLeft)),
        KeyOutcome::Ignored
    );
}

#[test]
fn unknown_slug_renders_not_found() {
    let h = harness("/case-studies/does-not-exist");
    assert_eq!(
        h.machine.page(),
        &Page::NotFound {
            path: "/case-studies/does-not-exist".into()
        }
    );
    assert_eq!(h.machine.pager_position(), None);
}

#[test]
fn back_navigation_between_detail_pages() {
    let mut h = harness("/case-studies/curb-appeal");
    h.machine.next();
    h.bar.back();
    h.machine.handle_location_change();
    assert_eq!(h.machine.page().slug(), Some("curb-appeal"));
}

// ── Analytics ───────────────────────────────────────────────────────────────

#[test]
fn selection_emits_one_event() {
    let mut h = harness("/");
    h.machine.select("pricing-page").unwrap();
    let selects: Vec<AnalyticsEvent> = h
        .analytics
        .events()
        .into_iter()
        .filter(|e| e.name() == "select_item")
        .collect();
    assert_eq!(
        selects,
        vec![AnalyticsEvent::select_item(
            "case_studies_home",
            "Case Studies",
            "pricing-page",
            "Pricing Page"
        )]
    );
}

#[test]
fn unknown_selection_emits_nothing() {
    let mut h = harness("/");
    assert!(h.machine.select("nope").is_err());
    assert_eq!(h.analytics.names(), vec!["page_view"]);
}

#[test]
fn route_changes_emit_page_views() {
    let mut h = harness("/?ref=mail");
    h.machine.navigate("/case-studies/curb-appeal");
    h.machine.open("search").unwrap();
    assert_eq!(h.analytics.names(), vec!["page_view", "page_view"]);
    assert_eq!(
        h.analytics.events()[0],
        AnalyticsEvent::PageView {
            page_path: "/?ref=mail".into()
        }
    );
}
