use super::*;

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Four stacked 500px sections starting at y=0, an 800px viewport, a 64px bar.
fn page() -> Scrollspy {
    let mut spy = Scrollspy::new(ids(&["strengths", "experience", "projects", "contact"]), 64.0);
    spy.set_viewport_height(800.0);
    for (i, id) in ["strengths", "experience", "projects", "contact"].iter().enumerate() {
        spy.set_section_bounds(id, SectionBounds::new(i as f64 * 500.0, 500.0));
    }
    spy
}

#[test]
fn nothing_visible_means_none() {
    let mut spy = page();
    spy.scroll_to(5000.0);
    assert_eq!(spy.active(), None);
}

#[test]
fn no_layout_means_none() {
    let mut spy = Scrollspy::new(ids(&["a", "b"]), 64.0);
    spy.set_viewport_height(800.0);
    assert_eq!(spy.active(), None);
}

#[test]
fn single_intersecting_section_is_reported() {
    let mut spy = Scrollspy::new(ids(&["a", "b"]), 0.0);
    spy.set_viewport_height(800.0);
    spy.set_section_bounds("a", SectionBounds::new(100.0, 200.0));
    spy.set_section_bounds("b", SectionBounds::new(3000.0, 200.0));
    assert_eq!(spy.active(), Some("a"));
}

#[test]
fn highest_ratio_wins() {
    let mut spy = page();
    // Window is [964, 1700]: experience 36/500, projects 500/500, contact 200/500.
    spy.scroll_to(900.0);
    assert_eq!(spy.active(), Some("projects"));
}

#[test]
fn ties_go_to_list_order() {
    let mut spy = Scrollspy::new(ids(&["first", "second"]), 0.0);
    spy.set_viewport_height(1000.0);
    spy.set_section_bounds("second", SectionBounds::new(500.0, 100.0));
    spy.set_section_bounds("first", SectionBounds::new(100.0, 100.0));
    assert_eq!(spy.active(), Some("first"));
}

#[test]
fn overlay_offset_hides_strip_under_bar() {
    let mut spy = Scrollspy::new(ids(&["top", "next"]), 0.0);
    spy.set_viewport_height(600.0);
    spy.set_section_bounds("top", SectionBounds::new(0.0, 100.0));
    spy.set_section_bounds("next", SectionBounds::new(100.0, 1000.0));
    assert_eq!(spy.active(), Some("top"));

    // A 120px bar covers the whole first section.
    spy.set_overlay_offset(120.0);
    assert_eq!(spy.intersection_ratio("top"), 0.0);
    assert_eq!(spy.active(), Some("next"));
}

#[test]
fn ratio_is_clamped_and_zero_height_scores_nothing() {
    let mut spy = Scrollspy::new(ids(&["flat"]), 0.0);
    spy.set_viewport_height(800.0);
    spy.set_section_bounds("flat", SectionBounds::new(10.0, 0.0));
    assert_eq!(spy.intersection_ratio("flat"), 0.0);
    assert_eq!(spy.intersection_ratio("untracked"), 0.0);
}

#[test]
fn subscribers_receive_current_then_changes_only() {
    let mut spy = page();
    let rx = spy.subscribe();
    assert_eq!(rx.try_recv().unwrap().as_deref(), Some("strengths"));

    spy.scroll_to(10.0);
    assert!(rx.try_recv().is_err());

    spy.scroll_to(900.0);
    assert_eq!(rx.try_recv().unwrap().as_deref(), Some("projects"));

    spy.scroll_to(9000.0);
    assert_eq!(rx.try_recv().unwrap(), None);
}

#[test]
fn dropped_receiver_unsubscribes() {
    let mut spy = page();
    let rx = spy.subscribe();
    let _kept = spy.subscribe();
    assert_eq!(spy.subscriber_count(), 2);
    drop(rx);
    spy.scroll_to(900.0);
    assert_eq!(spy.subscriber_count(), 1);
}

#[test]
fn observe_visibility_retargets_sections() {
    let mut spy = page();
    let rx = spy.observe_visibility(&ids(&["contact"]));
    assert_eq!(rx.try_recv().unwrap(), None);
    assert_eq!(spy.sections(), ids(&["contact"]).as_slice());

    spy.scroll_to(1200.0);
    assert_eq!(rx.try_recv().unwrap().as_deref(), Some("contact"));
}
