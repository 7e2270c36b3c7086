//! The published, read-only set of case studies.
//!
//! Built once at startup from source records. Records that fail to
//! normalize are excluded and reported rather than failing the whole build.

use std::collections::HashMap;

use crate::normalize::{NormalizeError, normalize};
use crate::slug::SlugResolver;
use crate::source::SourceRecord;
use crate::types::CaseStudy;
use crate::yaml::RawRecord;

/// Default size of the featured (pager-navigable) prefix.
pub const DEFAULT_FEATURED_COUNT: usize = 3;

/// Immutable, ordered case-study collection with slug lookup.
#[derive(Debug, Clone, Default)]
pub struct CaseStudyCollection {
    records: Vec<CaseStudy>,
    by_slug: HashMap<String, usize>,
    featured_count: usize,
}

/// A record left out of the collection, with the reason.
#[derive(Debug)]
pub struct ExcludedRecord {
    pub origin: String,
    pub error: NormalizeError,
}

/// Result of a collection build.
#[derive(Debug)]
pub struct BuildReport {
    pub collection: CaseStudyCollection,
    pub excluded: Vec<ExcludedRecord>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.excluded.is_empty()
    }
}

impl CaseStudyCollection {
    /// Normalize `sources` in order. `origin` names each record for reporting.
    pub fn build<I>(sources: I, featured_count: usize) -> BuildReport
    where
        I: IntoIterator<Item = (String, SourceRecord)>,
    {
        let mut slugs = SlugResolver::new();
        let mut records = Vec::new();
        let mut excluded = Vec::new();

        for (origin, source) in sources {
            match normalize(&source, &mut slugs) {
                Ok(cs) => records.push(cs),
                Err(error) => {
                    log::warn!("Excluding {origin}: {error}");
                    excluded.push(ExcludedRecord { origin, error });
                }
            }
        }

        BuildReport {
            collection: Self::from_records(records, featured_count),
            excluded,
        }
    }

    /// Classify and normalize raw YAML records.
    pub fn from_raw(raw: Vec<RawRecord>, featured_count: usize) -> BuildReport {
        let mut classified = Vec::with_capacity(raw.len());
        let mut excluded = Vec::new();

        for record in raw {
            match SourceRecord::from_yaml(&record.origin, record.value) {
                Ok(source) => classified.push((record.origin, source)),
                Err(error) => {
                    log::warn!("Excluding {}: {error}", record.origin);
                    excluded.push(ExcludedRecord {
                        origin: record.origin,
                        error,
                    });
                }
            }
        }

        let mut report = Self::build(classified, featured_count);
        excluded.append(&mut report.excluded);
        report.excluded = excluded;
        report
    }

    /// Wrap already-normalized records. Later duplicates of a slug are
    /// unreachable by lookup, so callers should come through [`Self::build`].
    pub fn from_records(records: Vec<CaseStudy>, featured_count: usize) -> Self {
        let mut by_slug = HashMap::with_capacity(records.len());
        for (i, cs) in records.iter().enumerate() {
            by_slug.entry(cs.slug.clone()).or_insert(i);
        }
        Self {
            records,
            by_slug,
            featured_count,
        }
    }

    pub fn records(&self) -> &[CaseStudy] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&CaseStudy> {
        self.by_slug.get(slug).map(|&i| &self.records[i])
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    /// The navigable prefix used by the pager.
    pub fn featured(&self) -> &[CaseStudy] {
        let n = self.featured_count.min(self.records.len());
        &self.records[..n]
    }

    /// Position of `slug` within the featured prefix.
    pub fn featured_position(&self, slug: &str) -> Option<usize> {
        self.featured().iter().position(|cs| cs.slug == slug)
    }
}
