//! Source record shapes, as authored in content files.
//!
//! Two generations of content exist side by side. Older "legacy" records are
//! free-text heavy (title, summary, tags, lessons, timeframe...). Newer
//! "structured" records already follow the canonical layout (header,
//! snapshot, highlights...). [`SourceRecord`] makes the distinction explicit
//! with a `kind` tag so the normalizer is a total function over both.

use serde::Deserialize;
use serde_yml::Value;

use crate::metric_parser::{ParsedMetric, parse_metric};
use crate::normalize::NormalizeError;
use crate::types::{
    CaseStudy, Cta, Highlight, Insight, Media, Process, Resources,
};

/// A content record in one of the two known shapes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceRecord {
    Legacy(LegacyRecord),
    Structured(StructuredRecord),
}

impl SourceRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Legacy(_) => "legacy",
            Self::Structured(_) => "structured",
        }
    }

    /// The slug the author wrote, if any.
    pub fn explicit_slug(&self) -> Option<&str> {
        match self {
            Self::Legacy(r) => r.slug.as_deref(),
            Self::Structured(r) => r.slug.as_deref(),
        }
    }

    /// Classify a raw YAML record.
    ///
    /// A `kind` field wins. Untagged records are structured when they carry a
    /// titled `header` and a `snapshot`, legacy when they carry a `title` or
    /// `problem`, and malformed otherwise.
    pub fn from_yaml(origin: &str, value: Value) -> Result<Self, NormalizeError> {
        if !value.is_mapping() {
            return Err(NormalizeError::malformed(origin, "record is not a mapping"));
        }

        if let Some(kind) = value.get("kind") {
            let kind = kind.as_str().unwrap_or_default().to_string();
            if kind != "legacy" && kind != "structured" {
                return Err(NormalizeError::UnknownKind {
                    origin: origin.to_string(),
                    kind,
                });
            }
            return serde_yml::from_value(value).map_err(|e| NormalizeError::InvalidShape {
                origin: origin.to_string(),
                kind,
                source: e,
            });
        }

        let has_header_title = value
            .get("header")
            .and_then(|h| h.get("title"))
            .and_then(Value::as_str)
            .is_some_and(|t| !t.trim().is_empty());
        let has_snapshot = value.get("snapshot").is_some_and(Value::is_mapping);

        if has_header_title && has_snapshot {
            log::debug!("{origin}: untagged record classified as structured");
            return serde_yml::from_value(value)
                .map(Self::Structured)
                .map_err(|e| NormalizeError::InvalidShape {
                    origin: origin.to_string(),
                    kind: "structured".to_string(),
                    source: e,
                });
        }

        if value.get("title").is_some() || value.get("problem").is_some() {
            log::debug!("{origin}: untagged record classified as legacy");
            return serde_yml::from_value(value)
                .map(Self::Legacy)
                .map_err(|e| NormalizeError::InvalidShape {
                    origin: origin.to_string(),
                    kind: "legacy".to_string(),
                    source: e,
                });
        }

        Err(NormalizeError::malformed(
            origin,
            "neither legacy (title/problem) nor structured (header/snapshot) markers present",
        ))
    }
}

// ── Metric values ───────────────────────────────────────────────────────────

/// A metric as written: either already numeric or a phrase to parse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric content, or `None` when the value is unusable.
    pub fn parse(&self) -> Option<ParsedMetric> {
        match self {
            Self::Number(value) if value.is_finite() => Some(ParsedMetric {
                value: *value,
                unit_suffix: "",
                decimal_precision: if value.fract() != 0.0 { 1 } else { 0 },
            }),
            Self::Number(_) => None,
            Self::Text(text) => parse_metric(text),
        }
    }
}

// ── Legacy shape ────────────────────────────────────────────────────────────

/// The older free-text record layout.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LegacyRecord {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    /// Path or URL of the hero image.
    pub hero: Option<String>,
    pub context: Option<LegacyContext>,
    pub problem: Option<String>,
    pub approach: Vec<String>,
    pub study_results: Vec<StudyResult>,
    pub design_sprint: Option<DesignSprint>,
    pub artifacts: Vec<LegacyArtifact>,
    pub resources: Vec<LegacyResource>,
    pub lessons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LegacyContext {
    pub role: Option<String>,
    pub team: Option<String>,
    /// Free text such as "5 days (+ test)" or "One semester".
    pub timeframe: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudyResult {
    pub label: String,
    pub value: MetricValue,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DesignSprint {
    pub framing: Option<String>,
    pub test_platform: Option<String>,
    pub participants: Option<String>,
    pub goals: Vec<String>,
    pub key_findings: Vec<String>,
    pub changes_shipped: Vec<String>,
    pub next_experiments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LegacyArtifact {
    pub src: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyResource {
    pub label: String,
    pub href: String,
}

// ── Structured shape ────────────────────────────────────────────────────────

/// The newer layout that already mirrors [`CaseStudy`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StructuredRecord {
    pub slug: Option<String>,
    pub header: StructuredHeader,
    pub snapshot: StructuredSnapshot,
    pub highlights: Vec<Highlight>,
    pub results: Vec<StructuredResult>,
    pub artifacts: Vec<StructuredArtifact>,
    pub insights: Vec<Insight>,
    pub resources: Option<Resources>,
    pub process: Option<Process>,
    pub footer_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StructuredHeader {
    pub title: String,
    pub subtitle: Option<String>,
    pub role: Option<String>,
    pub team: Option<String>,
    pub scope: Option<String>,
    #[serde(alias = "tldr")]
    pub summary: Option<String>,
    pub hero: Option<Media>,
    pub banner: Option<Media>,
    pub badges: Vec<String>,
    #[serde(alias = "ctas")]
    pub calls_to_action: Vec<Cta>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StructuredSnapshot {
    pub problem: String,
    pub outcome: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructuredResult {
    pub label: String,
    pub value: MetricValue,
    #[serde(default, alias = "suffix")]
    pub unit_suffix: Option<String>,
    #[serde(default, alias = "decimals")]
    pub decimal_precision: Option<u32>,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StructuredArtifact {
    pub title: Option<String>,
    #[serde(alias = "image")]
    pub media: Option<Media>,
    pub caption: Option<String>,
}

// ── Canonical → structured ──────────────────────────────────────────────────

impl From<&CaseStudy> for StructuredRecord {
    fn from(cs: &CaseStudy) -> Self {
        let h = &cs.header;
        Self {
            slug: Some(cs.slug.clone()),
            header: StructuredHeader {
                title: h.title.clone(),
                subtitle: h.subtitle.clone(),
                role: h.role.clone(),
                team: h.team.clone(),
                scope: h.scope.clone(),
                summary: Some(h.summary.clone()),
                hero: h.hero.clone(),
                banner: h.banner.clone(),
                badges: h.badges.clone(),
                calls_to_action: h.calls_to_action.clone(),
            },
            snapshot: StructuredSnapshot {
                problem: cs.snapshot.problem.clone(),
                outcome: cs.snapshot.outcome.clone(),
            },
            highlights: cs.highlights.clone(),
            results: cs
                .results
                .iter()
                .map(|r| StructuredResult {
                    label: r.label.clone(),
                    value: MetricValue::Number(r.value),
                    unit_suffix: Some(r.unit_suffix.clone()),
                    decimal_precision: Some(r.decimal_precision),
                    hint: r.hint.clone(),
                })
                .collect(),
            artifacts: cs
                .artifacts
                .iter()
                .map(|a| StructuredArtifact {
                    title: Some(a.title.clone()),
                    media: Some(a.media.clone()),
                    caption: a.caption.clone(),
                })
                .collect(),
            insights: cs.insights.clone(),
            resources: cs.resources.clone(),
            process: cs.process.clone(),
            footer_notes: cs.footer_notes.clone(),
        }
    }
}

impl From<&CaseStudy> for SourceRecord {
    fn from(cs: &CaseStudy) -> Self {
        Self::Structured(StructuredRecord::from(cs))
    }
}
