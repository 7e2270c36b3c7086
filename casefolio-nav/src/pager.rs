use casefolio_catalog::CaseStudyCollection;

/// Position of a detail page within the collection's featured prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerPosition {
    pub index: usize,
    pub len: usize,
}

impl PagerPosition {
    /// `None` when `slug` is not in the featured prefix.
    pub fn of(collection: &CaseStudyCollection, slug: &str) -> Option<Self> {
        collection.featured_position(slug).map(|index| Self {
            index,
            len: collection.featured().len(),
        })
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.len
    }

    pub fn prev_index(&self) -> Option<usize> {
        self.has_prev().then(|| self.index - 1)
    }

    pub fn next_index(&self) -> Option<usize> {
        self.has_next().then(|| self.index + 1)
    }
}

impl std::fmt::Display for PagerPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.index + 1, self.len)
    }
}
