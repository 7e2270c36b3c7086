use std::cell::RefCell;
use std::rc::Rc;

use super::*;

#[test]
fn location_parse_splits_parts() {
    let loc = Location::parse("/case-studies/x?ref=mail#cs=y&t=1");
    assert_eq!(loc.path, "/case-studies/x");
    assert_eq!(loc.query, "?ref=mail");
    assert_eq!(loc.hash, "#cs=y&t=1");
    assert_eq!(loc.page_path(), "/case-studies/x?ref=mail");
    assert_eq!(loc.to_string(), "/case-studies/x?ref=mail#cs=y&t=1");

    assert_eq!(Location::parse("").path, "/");
    assert_eq!(Location::parse("#cs=a").path, "/");
}

#[test]
fn with_hash_adds_missing_sign() {
    assert_eq!(Location::new("/").with_hash("cs=a").hash, "#cs=a");
    assert_eq!(Location::new("/").with_hash("#cs=a").hash, "#cs=a");
    assert_eq!(Location::new("/").with_hash("").hash, "");
}

#[test]
fn memory_bar_push_and_back() {
    let mut bar = MemoryAddressBar::at("/");
    bar.write(Location::new("/a"), HistoryMode::Push);
    bar.write(Location::new("/b"), HistoryMode::Push);
    assert_eq!(bar.history_len(), 3);
    assert!(bar.back());
    assert_eq!(bar.location().path, "/a");
    assert!(bar.forward());
    assert_eq!(bar.location().path, "/b");
    assert!(!bar.forward());
}

#[test]
fn memory_bar_push_truncates_forward_entries() {
    let mut bar = MemoryAddressBar::at("/");
    bar.write(Location::new("/a"), HistoryMode::Push);
    bar.back();
    bar.write(Location::new("/c"), HistoryMode::Push);
    assert_eq!(bar.history_len(), 2);
    assert!(!bar.forward());
}

#[test]
fn memory_bar_replace_keeps_length() {
    let mut bar = MemoryAddressBar::at("/");
    bar.write(Location::new("/a"), HistoryMode::Replace);
    assert_eq!(bar.history_len(), 1);
    assert_eq!(bar.location().path, "/a");
    assert!(!bar.back());
}

#[test]
fn clones_share_history() {
    let bar = MemoryAddressBar::at("/");
    let handle = bar.clone();
    let mut nav = Navigator::new(bar);
    nav.set_param("cs", "x", HistoryMode::Push);
    assert_eq!(handle.location().hash, "#cs=x");
    assert!(handle.back());
    assert_eq!(nav.param("cs"), None);
}

#[test]
fn set_and_clear_preserve_other_params() {
    let mut nav = Navigator::new(MemoryAddressBar::at("/#ref=home"));
    assert!(nav.set_param("cs", "x", HistoryMode::Push));
    assert_eq!(nav.location().hash, "#ref=home&cs=x");
    assert!(!nav.set_param("cs", "x", HistoryMode::Push));
    assert!(nav.clear_param("cs", HistoryMode::Replace));
    assert_eq!(nav.location().hash, "#ref=home");
    assert!(!nav.clear_param("cs", HistoryMode::Replace));
}

#[test]
fn navigate_drops_hash() {
    let mut nav = Navigator::new(MemoryAddressBar::at("/?q=1#cs=x"));
    nav.navigate("/case-studies/y");
    let loc = nav.location();
    assert_eq!(loc.path, "/case-studies/y");
    assert_eq!(loc.query, "");
    assert_eq!(loc.hash, "");
}

#[test]
fn location_changed_reports_external_edits() {
    let bar = MemoryAddressBar::at("/");
    let handle = bar.clone();
    let mut nav = Navigator::new(bar);

    nav.set_param("cs", "x", HistoryMode::Push);
    assert!(nav.location_changed().is_empty());

    handle.back();
    let changes = nav.location_changed();
    assert_eq!(
        changes,
        vec![ParamChange {
            key: "cs".into(),
            old: Some("x".into()),
            new: None,
        }]
    );
    assert!(nav.location_changed().is_empty());
}

#[test]
fn listeners_fire_only_for_their_key() {
    let bar = MemoryAddressBar::at("/");
    let handle = bar.clone();
    let mut nav = Navigator::new(bar);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    nav.on_param_change("cs", move |c| sink.borrow_mut().push(c.new.clone()));

    handle.type_address("/#tab=2");
    nav.location_changed();
    assert!(seen.borrow().is_empty());

    handle.type_address("/#tab=2&cs=y");
    nav.location_changed();
    assert_eq!(*seen.borrow(), vec![Some("y".to_string())]);
}
