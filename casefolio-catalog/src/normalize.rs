//! Conversion of source records into the canonical [`CaseStudy`] schema.
//!
//! Structured records are mostly copied across with missing media and
//! unparseable metrics removed. Legacy records are mapped field by field,
//! synthesizing badges, CTAs, results, highlights and insights from their
//! free-text fields.

use thiserror::Error;

use crate::metric_parser::{MetricPattern, parse_metric_with_pattern};
use crate::slug::SlugResolver;
use crate::source::{DesignSprint, LegacyRecord, SourceRecord, StructuredRecord};
use crate::types::{
    Artifact, CaseStudy, Cta, Emphasis, Header, Highlight, IconKey, Insight, MAX_DECIMAL_PRECISION,
    Media, Process, Resources, ResultStat, Snapshot, StageContent,
};

/// Errors raised while turning content into canonical records.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Structurally unusable: no derivable title and no problem statement,
    /// or no recognizable shape at all.
    #[error("Malformed record {origin}: {reason}")]
    MalformedRecord { origin: String, reason: String },

    /// The `kind` tag names an unknown shape.
    #[error("Unknown record kind '{kind}' in {origin}")]
    UnknownKind { origin: String, kind: String },

    /// The record names its shape but does not deserialize as it.
    #[error("Invalid {kind} record in {origin}: {source}")]
    InvalidShape {
        origin: String,
        kind: String,
        source: serde_yml::Error,
    },
}

impl NormalizeError {
    pub fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}

/// How many tags, lessons and badges a legacy record contributes.
pub const FIRST_FEW: usize = 3;

/// Generic insight titles, assigned in rotation.
pub const INSIGHT_TITLES: &[&str] = &["Key Insight", "Impact", "Pattern"];

/// Highlight icons for well-known tags. Unknown tags get [`DEFAULT_TAG_ICON`].
const TAG_ICONS: &[(&str, IconKey)] = &[
    ("AI UX", IconKey::Brain),
    ("Design Systems", IconKey::Layers),
    ("Design Sprint", IconKey::Rocket),
];

pub const DEFAULT_TAG_ICON: IconKey = IconKey::Brain;

const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx"];

/// Normalize one record, reserving its slug in `slugs`.
pub fn normalize(record: &SourceRecord, slugs: &mut SlugResolver) -> Result<CaseStudy, NormalizeError> {
    let mut cs = match record {
        SourceRecord::Legacy(r) => normalize_legacy(r)?,
        SourceRecord::Structured(r) => normalize_structured(r)?,
    };
    cs.slug = slugs.resolve(&cs.header.title, record.explicit_slug());
    log::debug!("Normalized {} record '{}'", record.kind(), cs.slug);
    Ok(cs)
}

/// Normalize a record on its own, against an empty slug set.
pub fn normalize_one(record: &SourceRecord) -> Result<CaseStudy, NormalizeError> {
    normalize(record, &mut SlugResolver::new())
}

/// Pick a CTA icon from keywords in its label and URL.
pub fn icon_for_link(label: &str, href: &str) -> IconKey {
    let l = label.to_lowercase();
    let h = href.to_lowercase();
    if l.contains("watch") || l.contains("demo") || h.contains("vimeo") {
        IconKey::Play
    } else if l.contains("figma") || l.contains("prototype") {
        IconKey::LinkOut
    } else if l.contains("design source") || DOCUMENT_EXTENSIONS.iter().any(|ext| h.ends_with(ext)) {
        IconKey::Document
    } else {
        IconKey::ExternalLink
    }
}

/// Highlight icon for a tag, by exact match.
pub fn icon_for_tag(tag: &str) -> IconKey {
    TAG_ICONS
        .iter()
        .find(|(name, _)| *name == tag)
        .map_or(DEFAULT_TAG_ICON, |(_, icon)| *icon)
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|v| !v.trim().is_empty())
}

fn describe(slug: Option<&str>) -> String {
    slug.map_or_else(|| "(untitled record)".to_string(), |s| format!("'{s}'"))
}

// ── Structured ──────────────────────────────────────────────────────────────

fn normalize_structured(r: &StructuredRecord) -> Result<CaseStudy, NormalizeError> {
    if r.header.title.trim().is_empty() && r.snapshot.problem.trim().is_empty() {
        return Err(NormalizeError::malformed(
            describe(r.slug.as_deref()),
            "structured record has neither a title nor a problem statement",
        ));
    }

    let h = &r.header;
    let header = Header {
        title: h.title.clone(),
        subtitle: h.subtitle.clone(),
        role: h.role.clone(),
        team: h.team.clone(),
        scope: h.scope.clone(),
        summary: h.summary.clone().unwrap_or_default(),
        hero: h.hero.clone().filter(Media::is_usable),
        banner: h.banner.clone().filter(Media::is_usable),
        badges: h.badges.clone(),
        calls_to_action: h.calls_to_action.clone(),
    };

    let results = r
        .results
        .iter()
        .filter_map(|stat| {
            let Some(parsed) = stat.value.parse() else {
                log::debug!("Dropping result '{}': value does not parse", stat.label);
                return None;
            };
            Some(ResultStat {
                label: stat.label.clone(),
                value: parsed.value,
                unit_suffix: stat
                    .unit_suffix
                    .clone()
                    .unwrap_or_else(|| parsed.unit_suffix.to_string()),
                decimal_precision: stat
                    .decimal_precision
                    .unwrap_or(parsed.decimal_precision)
                    .min(MAX_DECIMAL_PRECISION),
                hint: stat.hint.clone(),
            })
        })
        .collect();

    let artifacts = r
        .artifacts
        .iter()
        .enumerate()
        .filter_map(|(i, a)| {
            let media = a.media.clone().filter(Media::is_usable)?;
            Some(Artifact {
                title: a.title.clone().unwrap_or_else(|| format!("Artifact {}", i + 1)),
                media,
                caption: a.caption.clone(),
            })
        })
        .collect();

    Ok(CaseStudy {
        slug: String::new(),
        header,
        snapshot: Snapshot {
            problem: r.snapshot.problem.clone(),
            outcome: r.snapshot.outcome.clone(),
        },
        highlights: r.highlights.clone(),
        results,
        artifacts,
        insights: r.insights.clone(),
        resources: r.resources.clone().filter(|res| !res.items.is_empty()),
        process: r.process.clone().and_then(prune_process),
        footer_notes: r.footer_notes.clone(),
    })
}

/// Drop empty stages; `None` when nothing is left.
fn prune_process(mut p: Process) -> Option<Process> {
    for stage in [
        &mut p.sprint,
        &mut p.findings,
        &mut p.changes,
        &mut p.experiments,
    ] {
        if stage.as_ref().is_some_and(StageContent::is_empty) {
            *stage = None;
        }
    }
    p.extra.retain(|x| !x.content.is_empty());
    if p.is_empty() { None } else { Some(p) }
}

// ── Legacy ──────────────────────────────────────────────────────────────────

fn normalize_legacy(r: &LegacyRecord) -> Result<CaseStudy, NormalizeError> {
    let title = non_empty(&r.title).unwrap_or_default().to_string();
    let problem = non_empty(&r.problem).unwrap_or_default().to_string();
    if title.is_empty() && problem.is_empty() {
        return Err(NormalizeError::malformed(
            describe(r.slug.as_deref()),
            "legacy record has neither a title nor a problem statement",
        ));
    }

    let summary = non_empty(&r.summary).unwrap_or_default().to_string();
    let context = r.context.clone().unwrap_or_default();
    let ctas = legacy_ctas(r);

    let outcome = r
        .design_sprint
        .as_ref()
        .and_then(|ds| ds.key_findings.first())
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| summary.clone());

    let header = Header {
        title: title.clone(),
        subtitle: non_empty(&r.subtitle).map(str::to_string),
        role: non_empty(&context.role).map(str::to_string),
        team: non_empty(&context.team).map(str::to_string),
        scope: non_empty(&context.timeframe).map(str::to_string),
        summary: summary.clone(),
        hero: non_empty(&r.hero).map(|src| Media::image(src, format!("{title} hero"))),
        banner: None,
        badges: legacy_badges(r),
        calls_to_action: ctas.clone(),
    };

    let highlight_body = r
        .approach
        .first()
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| summary.clone());
    let highlights = r
        .tags
        .iter()
        .take(FIRST_FEW)
        .map(|tag| Highlight {
            icon: Some(icon_for_tag(tag)),
            label: tag.clone(),
            body: highlight_body.clone(),
        })
        .collect();

    let insights = r
        .lessons
        .iter()
        .take(FIRST_FEW)
        .enumerate()
        .map(|(i, lesson)| Insight {
            icon: None,
            title: INSIGHT_TITLES[i % INSIGHT_TITLES.len()].to_string(),
            body: lesson.clone(),
        })
        .collect();

    Ok(CaseStudy {
        slug: String::new(),
        header,
        snapshot: Snapshot { problem, outcome },
        highlights,
        results: legacy_results(r),
        artifacts: legacy_artifacts(r, &title),
        insights,
        resources: if ctas.is_empty() {
            None
        } else {
            Some(Resources { items: ctas })
        },
        process: r.design_sprint.as_ref().and_then(legacy_process),
        footer_notes: Vec::new(),
    })
}

/// Badges like `"8.6/10 ease"` from the first parseable study results.
fn legacy_badges(r: &LegacyRecord) -> Vec<String> {
    r.study_results
        .iter()
        .filter_map(|sr| {
            let parsed = sr.value.parse()?;
            let first_word = sr
                .label
                .to_lowercase()
                .split(' ')
                .next()
                .unwrap_or_default()
                .to_string();
            let badge = format!("{}{} {}", parsed.value, parsed.unit_suffix, first_word);
            Some(badge.trim_end().to_string())
        })
        .take(FIRST_FEW)
        .collect()
}

/// CTAs from the flat resource list, emphasis by position.
fn legacy_ctas(r: &LegacyRecord) -> Vec<Cta> {
    r.resources
        .iter()
        .enumerate()
        .map(|(i, res)| Cta {
            label: res.label.clone(),
            href: res.href.clone(),
            emphasis: Emphasis::for_position(i),
            icon: Some(icon_for_link(&res.label, &res.href)),
        })
        .collect()
}

fn legacy_results(r: &LegacyRecord) -> Vec<ResultStat> {
    let mut stats: Vec<ResultStat> = r
        .study_results
        .iter()
        .filter_map(|sr| {
            let parsed = sr.value.parse()?;
            Some(ResultStat {
                label: sr.label.clone(),
                value: parsed.value,
                unit_suffix: parsed.unit_suffix.to_string(),
                decimal_precision: parsed.decimal_precision,
                hint: None,
            })
        })
        .collect();

    let has_cycle_time = stats
        .iter()
        .any(|s| s.label.to_lowercase().contains("cycle time"));
    let timeframe = r.context.as_ref().and_then(|c| c.timeframe.as_deref());

    if !has_cycle_time
        && let Some((MetricPattern::DayCount, parsed)) =
            timeframe.and_then(parse_metric_with_pattern)
    {
        stats.push(ResultStat {
            label: "Cycle time".to_string(),
            value: parsed.value,
            unit_suffix: parsed.unit_suffix.to_string(),
            decimal_precision: parsed.decimal_precision,
            hint: Some("From timeframe".to_string()),
        });
    }

    stats
}

fn legacy_artifacts(r: &LegacyRecord, title: &str) -> Vec<Artifact> {
    r.artifacts
        .iter()
        .enumerate()
        .filter_map(|(i, a)| {
            let src = non_empty(&a.src)?;
            let n = i + 1;
            let caption = non_empty(&a.caption);
            let artifact_title = caption
                .and_then(|c| c.split(':').next())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map_or_else(|| format!("Artifact {n}"), str::to_string);
            let alt = caption.map_or_else(|| format!("{title} artifact {n}"), str::to_string);
            Some(Artifact {
                title: artifact_title,
                media: Media::image(src, alt),
                caption: caption.map(str::to_string),
            })
        })
        .collect()
}

fn legacy_process(ds: &DesignSprint) -> Option<Process> {
    let framing: Vec<String> = [
        ("Framing", &ds.framing),
        ("Platform", &ds.test_platform),
        ("Participants", &ds.participants),
    ]
    .into_iter()
    .filter_map(|(label, value)| non_empty(value).map(|v| format!("{label}: {v}")))
    .collect();

    let list = |items: &[String]| StageContent {
        text: None,
        items: items.to_vec(),
    };

    prune_process(Process {
        sprint: Some(StageContent {
            text: (!framing.is_empty()).then(|| framing.join(" • ")),
            items: ds.goals.clone(),
        }),
        findings: Some(list(&ds.key_findings)),
        changes: Some(list(&ds.changes_shipped)),
        experiments: Some(list(&ds.next_experiments)),
        extra: Vec::new(),
    })
}
