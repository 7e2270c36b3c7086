//! Case-study content model, metric parsing, slugs, and normalization.
//!
//! This crate turns hand-written content in two historical shapes into one
//! canonical, immutable collection. It has no rendering or navigation
//! concerns; `casefolio-nav` consumes the collection it produces.

pub mod collection;
pub mod metric_parser;
pub mod normalize;
pub mod slug;
pub mod source;
pub mod types;
pub mod yaml;

pub use collection::{BuildReport, CaseStudyCollection, DEFAULT_FEATURED_COUNT, ExcludedRecord};
pub use metric_parser::{MetricPattern, ParsedMetric, parse_metric};
pub use normalize::{NormalizeError, normalize, normalize_one};
pub use slug::{SlugResolver, resolve_slug, slugify};
pub use source::SourceRecord;
pub use types::*;
pub use yaml::{RawRecord, YamlError, load_collection, load_records};
