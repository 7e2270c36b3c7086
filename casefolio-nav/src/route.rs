//! Route paths and the page they resolve to.

use casefolio_catalog::CaseStudyCollection;

/// Path prefix of detail pages.
pub const CASE_STUDY_PREFIX: &str = "/case-studies/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CaseStudy(String),
    Unknown(String),
}

impl Route {
    /// Parse a path. Query, hash and a trailing slash are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Route::Home;
        }
        match trimmed.strip_prefix(CASE_STUDY_PREFIX) {
            Some(slug) if !slug.is_empty() && !slug.contains('/') => {
                Route::CaseStudy(slug.to_string())
            }
            _ => Route::Unknown(path.to_string()),
        }
    }

    pub fn case_study(slug: &str) -> Self {
        Route::CaseStudy(slug.to_string())
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::CaseStudy(slug) => format!("{CASE_STUDY_PREFIX}{slug}"),
            Route::Unknown(path) => path.clone(),
        }
    }
}

/// What gets rendered for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    CaseStudy { slug: String },
    /// Either an unknown path or a detail page for a slug that is not in
    /// the collection. Rendered as a placeholder.
    NotFound { path: String },
}

impl Page {
    pub fn resolve(route: &Route, collection: &CaseStudyCollection) -> Self {
        match route {
            Route::Home => Page::Home,
            Route::CaseStudy(slug) if collection.contains(slug) => Page::CaseStudy {
                slug: slug.clone(),
            },
            other => Page::NotFound { path: other.path() },
        }
    }

    pub fn is_detail(&self) -> bool {
        matches!(self, Page::CaseStudy { .. })
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            Page::CaseStudy { slug } => Some(slug.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Page::Home => write!(f, "home"),
            Page::CaseStudy { slug } => write!(f, "case study '{slug}'"),
            Page::NotFound { path } => write!(f, "not found ({path})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/case-studies/curb-appeal"), Route::case_study("curb-appeal"));
        assert_eq!(Route::parse("/case-studies/curb-appeal/"), Route::case_study("curb-appeal"));
        assert_eq!(Route::parse("/case-studies/x?ref=1#cs=y"), Route::case_study("x"));
        assert_eq!(Route::parse("/case-studies/"), Route::Unknown("/case-studies/".into()));
        assert_eq!(Route::parse("/about"), Route::Unknown("/about".into()));
        assert_eq!(Route::parse("/case-studies/a/b"), Route::Unknown("/case-studies/a/b".into()));
    }

    #[test]
    fn path_round_trips() {
        for path in ["/", "/case-studies/x", "/about"] {
            assert_eq!(Route::parse(path).path(), path);
        }
    }
}
