use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use casefolio_catalog::{CaseStudy, Cta};
use casefolio_nav::NavConfig;

use crate::CliError;

use super::build_collection;

pub(crate) fn run_show(content: &Path, nav: &NavConfig, slug: &str) -> Result<(), CliError> {
    let report = build_collection(content, nav)?;
    let Some(cs) = report.collection.get(slug) else {
        return Err(CliError::not_found(format!("no case study with slug '{slug}'")));
    };
    print_case_study(cs);
    Ok(())
}

fn field(label: &str, value: &str) {
    log::info!(
        "  {} {}",
        format!("{label}:").if_supports_color(Stdout, |t| t.cyan()),
        value,
    );
}

fn print_cta(cta: &Cta) {
    let icon = cta
        .icon
        .map(|i| format!(" [{i:?}]"))
        .unwrap_or_default();
    log::info!(
        "    {} -> {} ({:?}){}",
        cta.label.if_supports_color(Stdout, |t| t.bold()),
        cta.href,
        cta.emphasis,
        icon,
    );
}

fn print_case_study(cs: &CaseStudy) {
    let h = &cs.header;
    log::info!("{}", h.title.if_supports_color(Stdout, |t| t.bold()));
    if let Some(subtitle) = &h.subtitle {
        log::info!("{}", subtitle.if_supports_color(Stdout, |t| t.dimmed()));
    }
    crate::log_blank();

    field("Slug", &cs.slug);
    for (label, value) in [("Role", &h.role), ("Team", &h.team), ("Scope", &h.scope)] {
        if let Some(v) = value {
            field(label, v);
        }
    }
    field("Summary", &h.summary);
    match &h.hero {
        Some(hero) => field("Hero", &format!("{:?} {}", hero.kind, hero.src)),
        None => field("Hero", "(none)"),
    }
    if !h.badges.is_empty() {
        field("Badges", &h.badges.join(", "));
    }
    if !h.calls_to_action.is_empty() {
        field("Calls to action", "");
        h.calls_to_action.iter().for_each(print_cta);
    }
    crate::log_blank();

    field("Problem", &cs.snapshot.problem);
    field("Outcome", &cs.snapshot.outcome);

    if !cs.results.is_empty() {
        crate::log_blank();
        log::info!("{}", "Results".if_supports_color(Stdout, |t| t.bold()));
        for r in &cs.results {
            log::info!(
                "  {:>10}  {}{}",
                r.display_value().if_supports_color(Stdout, |t| t.green()),
                r.label,
                r.hint
                    .as_deref()
                    .map(|hint| format!(" ({hint})"))
                    .unwrap_or_default(),
            );
        }
    }

    if !cs.highlights.is_empty() {
        crate::log_blank();
        log::info!("{}", "Highlights".if_supports_color(Stdout, |t| t.bold()));
        for hl in &cs.highlights {
            log::info!("  {}: {}", hl.label.if_supports_color(Stdout, |t| t.cyan()), hl.body);
        }
    }

    if !cs.artifacts.is_empty() {
        crate::log_blank();
        log::info!("{}", "Artifacts".if_supports_color(Stdout, |t| t.bold()));
        for a in &cs.artifacts {
            log::info!("  {} ({})", a.title, a.media.src.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }

    if !cs.insights.is_empty() {
        crate::log_blank();
        log::info!("{}", "Insights".if_supports_color(Stdout, |t| t.bold()));
        for i in &cs.insights {
            log::info!("  {}: {}", i.title.if_supports_color(Stdout, |t| t.cyan()), i.body);
        }
    }

    if let Some(process) = &cs.process {
        crate::log_blank();
        log::info!("{}", "Process".if_supports_color(Stdout, |t| t.bold()));
        let default = process.default_stage();
        for stage in process.stages() {
            let marker = if Some(stage.id) == default { "*" } else { " " };
            log::info!(
                " {marker}{} ({} items)",
                stage.label.if_supports_color(Stdout, |t| t.cyan()),
                stage.content.items.len(),
            );
            if let Some(text) = &stage.content.text {
                log::info!("    {text}");
            }
        }
    }

    if let Some(resources) = &cs.resources {
        crate::log_blank();
        log::info!("{}", "Resources".if_supports_color(Stdout, |t| t.bold()));
        resources.items.iter().for_each(print_cta);
    }

    for note in &cs.footer_notes {
        crate::log_blank();
        log::info!("{}", note.if_supports_color(Stdout, |t| t.dimmed()));
    }
}
