use std::sync::Arc;

use casefolio_catalog::CaseStudyCollection;
use casefolio_catalog::source::{LegacyRecord, LegacyResource, SourceRecord};

use super::*;
use crate::address_bar::MemoryAddressBar;
use crate::analytics::RecordingAnalytics;
use crate::scroll_lock::RecordingScrollPort;
use crate::scrollspy::{Scrollspy, SectionBounds};

fn record(title: &str, links: usize) -> (String, SourceRecord) {
    (
        format!("{title}.yaml"),
        SourceRecord::Legacy(LegacyRecord {
            title: Some(title.to_string()),
            problem: Some(format!("{title} problem")),
            resources: (0..links)
                .map(|i| LegacyResource {
                    label: format!("Link {i}"),
                    href: format!("https://example.com/{i}"),
                })
                .collect(),
            ..Default::default()
        }),
    )
}

fn collection() -> Arc<CaseStudyCollection> {
    let report = CaseStudyCollection::build(
        vec![record("Alpha", 2), record("Beta", 0), record("Gamma", 0)],
        3,
    );
    Arc::new(report.collection)
}

fn mount(address: &str) -> NavigationMachine<MemoryAddressBar> {
    NavigationMachine::mount(
        collection(),
        MemoryAddressBar::at(address),
        ScrollLock::new(RecordingScrollPort::new()),
        RecordingAnalytics::new(),
        NavConfig::default(),
    )
}

#[test]
fn mount_with_unknown_hash_slug_stays_closed_and_cleans_hash() {
    let machine = mount("/#cs=nope&ref=x");
    assert!(!machine.is_overlay_open());
    assert_eq!(machine.location().hash, "#ref=x");
}

#[test]
fn open_unknown_slug_is_an_error_without_side_effects() {
    let mut machine = mount("/#ref=x");
    assert_eq!(machine.open("nope"), Err(NavError::unknown_slug("nope")));
    assert_eq!(machine.location().hash, "#ref=x");
    assert!(!machine.is_overlay_open());
}

#[test]
fn open_same_slug_twice_is_a_no_op() {
    let mut machine = mount("/");
    machine.open("alpha").unwrap();
    machine.open("alpha").unwrap();
    assert_eq!(machine.overlay_slug(), Some("alpha"));
    assert_eq!(machine.lock.stats().acquisitions, 1);
}

#[test]
fn open_fails_when_lock_is_held_elsewhere() {
    let mut machine = mount("/");
    let _other = machine.lock.acquire("menu").unwrap();
    let err = machine.open("beta").unwrap_err();
    assert_eq!(err, NavError::ScrollLockHeld { holder: "menu".into() });
    assert!(!machine.is_overlay_open());
    assert_eq!(machine.location().hash, "");
}

#[test]
fn focus_trap_covers_close_button_and_links() {
    let mut machine = mount("/");
    machine.open("alpha").unwrap();
    let count = machine.overlay_record().unwrap().focusable_count();
    assert!(count > 1);
    assert_eq!(machine.focused_control(), Some(0));

    for _ in 0..count {
        assert_eq!(machine.handle_key(KeyEvent::new(Key::Tab)), KeyOutcome::Handled);
    }
    assert_eq!(machine.focused_control(), Some(0));

    machine.handle_key(KeyEvent::new(Key::Tab).shift());
    assert_eq!(machine.focused_control(), Some(count - 1));
}

#[test]
fn tab_without_overlay_is_ignored() {
    let mut machine = mount("/");
    assert_eq!(machine.handle_key(KeyEvent::new(Key::Tab)), KeyOutcome::Ignored);
    assert_eq!(machine.focused_control(), None);
}

#[test]
fn escape_without_overlay_is_ignored() {
    let mut machine = mount("/");
    assert_eq!(machine.handle_key(KeyEvent::new(Key::Escape)), KeyOutcome::Ignored);
}

#[test]
fn arrows_ignored_on_list_page() {
    let mut machine = mount("/");
    assert_eq!(machine.handle_key(KeyEvent::new(Key::ArrowRight)), KeyOutcome::Ignored);
    assert_eq!(machine.page(), &Page::Home);
}

#[test]
fn arrows_ignored_with_modifiers_or_in_text_input() {
    let mut machine = mount("/case-studies/beta");
    for event in [
        KeyEvent::new(Key::ArrowRight).shift(),
        KeyEvent::new(Key::ArrowRight).ctrl(),
        KeyEvent::new(Key::ArrowRight).alt(),
        KeyEvent::new(Key::ArrowRight).meta(),
        KeyEvent::new(Key::ArrowRight).in_text_input(),
    ] {
        assert_eq!(machine.handle_key(event), KeyOutcome::Ignored);
    }
    assert_eq!(machine.page().slug(), Some("beta"));
}

#[test]
fn arrows_move_pager_on_detail_page() {
    let mut machine = mount("/case-studies/beta");
    assert_eq!(machine.handle_key(KeyEvent::new(Key::ArrowRight)), KeyOutcome::Handled);
    assert_eq!(machine.page().slug(), Some("gamma"));
    assert_eq!(machine.handle_key(KeyEvent::new(Key::ArrowRight)), KeyOutcome::Ignored);
    assert_eq!(machine.handle_key(KeyEvent::new(Key::ArrowLeft)), KeyOutcome::Handled);
    assert_eq!(machine.page().slug(), Some("beta"));
}

#[test]
fn navigate_tears_down_overlay() {
    let mut machine = mount("/");
    machine.open("alpha").unwrap();
    machine.navigate("/case-studies/beta");
    assert!(!machine.is_overlay_open());
    assert!(!machine.lock.is_held());
    assert_eq!(machine.location().hash, "");
}

#[test]
fn section_feed_is_drained_to_latest() {
    let mut spy = Scrollspy::new(
        vec!["strengths".into(), "experience".into()],
        0.0,
    );
    spy.set_viewport_height(400.0);
    spy.set_section_bounds("strengths", SectionBounds::new(0.0, 400.0));
    spy.set_section_bounds("experience", SectionBounds::new(400.0, 400.0));

    let mut machine = mount("/");
    machine.attach_sections(&mut spy);
    assert_eq!(machine.active_section(), Some("strengths"));

    spy.scroll_to(400.0);
    spy.scroll_to(2000.0);
    spy.scroll_to(400.0);
    assert_eq!(machine.active_section(), Some("strengths"));
    assert_eq!(machine.sync_active_section(), Some("experience"));
}

#[test]
fn section_feed_closes_when_source_goes_away() {
    let mut spy = Scrollspy::new(vec!["strengths".into()], 0.0);
    let mut machine = mount("/");
    machine.attach_sections(&mut spy);
    drop(spy);
    assert_eq!(machine.sync_active_section(), None);
    assert!(machine.section_feed.is_none());
}
