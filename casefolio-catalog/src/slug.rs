//! Stable URL identifiers for case studies.

use std::collections::HashSet;

/// Slug used when a title has no characters that survive slugification.
pub const FALLBACK_SLUG: &str = "case-study";

/// Turn a title into a URL slug.
///
/// Lowercases, drops everything except ASCII word characters, whitespace and
/// hyphens, then collapses whitespace runs into single hyphens.
///
/// ```
/// use casefolio_catalog::slug::slugify;
///
/// assert_eq!(slugify("Curb Appeal — Street Food Finder"), "curb-appeal-street-food-finder");
/// assert_eq!(slugify("AI Swing Coach: Mobile Trading"), "ai-swing-coach-mobile-trading");
/// ```
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Resolve the slug for one record against the slugs already taken.
///
/// An explicit slug is used verbatim; otherwise the title is slugified.
/// When the candidate is taken, `-2`, `-3`, ... is appended until it is free.
/// Pure: the same inputs always give the same output.
pub fn resolve_slug(title: &str, explicit: Option<&str>, existing: &HashSet<String>) -> String {
    let base = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => {
            let derived = slugify(title);
            if derived.is_empty() {
                FALLBACK_SLUG.to_string()
            } else {
                derived
            }
        }
    };

    if !existing.contains(&base) {
        return base;
    }

    let mut n = 2u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !existing.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Hands out unique slugs across one collection build.
#[derive(Debug, Default)]
pub struct SlugResolver {
    taken: HashSet<String>,
}

impl SlugResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and reserve a slug.
    pub fn resolve(&mut self, title: &str, explicit: Option<&str>) -> String {
        let slug = resolve_slug(title, explicit, &self.taken);
        if let Some(wanted) = explicit.map(str::trim).filter(|s| !s.is_empty())
            && wanted != slug
        {
            log::warn!("Slug '{wanted}' is already taken; using '{slug}'");
        }
        self.taken.insert(slug.clone());
        slug
    }

    pub fn is_taken(&self, slug: &str) -> bool {
        self.taken.contains(slug)
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
