use std::path::Path;
use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use casefolio_nav::{
    AnalyticsEvent, KeyEvent, KeyOutcome, Location, MemoryAddressBar, NavConfig,
    NavigationMachine, RecordingAnalytics, RecordingScrollPort, ScrollLock,
};

use crate::CliError;

use super::build_collection;

/// Input to replay after mounting.
pub(crate) struct Replay<'a> {
    pub path: &'a str,
    pub hash: Option<&'a str>,
    pub select: Option<&'a str>,
    pub keys: &'a [KeyEvent],
}

pub(crate) fn run_route(content: &Path, nav: &NavConfig, replay: Replay<'_>) -> Result<(), CliError> {
    let report = build_collection(content, nav)?;
    let collection = Arc::new(report.collection);

    let bar = MemoryAddressBar::new(
        Location::parse(replay.path).with_hash(replay.hash.unwrap_or_default()),
    );
    let port = RecordingScrollPort::new();
    let lock = ScrollLock::new(port.clone());
    let analytics = RecordingAnalytics::new();

    let mut machine = NavigationMachine::mount(
        collection,
        bar.clone(),
        lock.clone(),
        analytics.clone(),
        nav.clone(),
    );

    if let Some(slug) = replay.select {
        machine.select(slug)?;
    }
    for key in replay.keys {
        let outcome = machine.handle_key(*key);
        log::debug!("{key:?} -> {outcome:?}");
        if outcome == KeyOutcome::Ignored {
            log::info!(
                "  {} {:?} ignored",
                "\u{00b7}".if_supports_color(Stdout, |t| t.dimmed()),
                key.key,
            );
        }
    }

    log::info!("{}", "Navigation state".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  Address:  {}",
        machine.location().if_supports_color(Stdout, |t| t.cyan())
    );
    log::info!("  Page:     {}", machine.page());
    log::info!(
        "  Pager:    {}",
        machine
            .pager_position()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string()),
    );
    match machine.overlay_slug() {
        Some(slug) => log::info!(
            "  Overlay:  {} (focus on control {})",
            slug.if_supports_color(Stdout, |t| t.green()),
            machine.focused_control().unwrap_or_default(),
        ),
        None => log::info!("  Overlay:  closed"),
    }
    log::info!(
        "  Scroll:   {}",
        if lock.is_held() { "locked" } else { "free" }
    );
    log::info!("  History:  {} entries", bar.history_len());

    let events = analytics.events();
    if !events.is_empty() {
        crate::log_blank();
        log::info!("{}", "Analytics".if_supports_color(Stdout, |t| t.bold()));
        for event in &events {
            match event {
                AnalyticsEvent::SelectItem {
                    item_list_id,
                    items,
                    ..
                } => {
                    let ids: Vec<&str> = items.iter().map(|i| i.item_id.as_str()).collect();
                    log::info!("  select_item {item_list_id}: {}", ids.join(", "));
                }
                AnalyticsEvent::PageView { page_path } => {
                    log::info!("  page_view {page_path}");
                }
            }
        }
    }

    machine.unmount();
    log::debug!("Scroll toggles: {:?}", port.toggles());
    Ok(())
}
