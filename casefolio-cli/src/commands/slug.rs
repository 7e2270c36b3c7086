use std::collections::HashSet;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use casefolio_catalog::{SlugResolver, resolve_slug};

/// Resolve every title against one shared slug set, in order.
pub(crate) fn run_slug(titles: &[String]) {
    let mut resolver = SlugResolver::new();
    let empty = HashSet::new();
    for title in titles {
        let slug = resolver.resolve(title, None);
        let note = if slug == resolve_slug(title, None, &empty) {
            String::new()
        } else {
            format!(" {}", "(disambiguated)".if_supports_color(Stdout, |t| t.yellow()))
        };
        log::info!(
            "  {} {} {}{}",
            format!("{title:?}"),
            "\u{2192}".if_supports_color(Stdout, |t| t.dimmed()),
            slug.if_supports_color(Stdout, |t| t.bold()),
            note,
        );
    }
}
