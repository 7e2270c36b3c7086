//! Canonical case-study schema.
//!
//! Every consumer renders from these types. Both source shapes (legacy and
//! structured, see [`crate::source`]) converge on [`CaseStudy`], so nothing
//! downstream ever branches on where a record came from.

use serde::{Deserialize, Serialize};

// ── Record ──────────────────────────────────────────────────────────────────

/// A normalized case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    /// Unique within one collection, stable across rebuilds.
    pub slug: String,
    pub header: Header,
    pub snapshot: Snapshot,
    pub highlights: Vec<Highlight>,
    pub results: Vec<ResultStat>,
    pub artifacts: Vec<Artifact>,
    pub insights: Vec<Insight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<Process>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub footer_notes: Vec<String>,
}

impl CaseStudy {
    pub fn title(&self) -> &str {
        &self.header.title
    }

    /// Number of focusable controls inside the detail overlay:
    /// the close button plus every header and resource CTA.
    pub fn focusable_count(&self) -> usize {
        1 + self.header.calls_to_action.len()
            + self.resources.as_ref().map_or(0, |r| r.items.len())
    }
}

// ── Header ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub summary: String,
    /// Absent when the source had no usable image or video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Media>,
    pub badges: Vec<String>,
    pub calls_to_action: Vec<Cta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub problem: String,
    pub outcome: String,
}

// ── Media ───────────────────────────────────────────────────────────────────

/// An image or video reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type", default)]
    pub kind: MediaKind,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl Media {
    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            src: src.into(),
            alt: Some(alt.into()),
            poster: None,
        }
    }

    /// Media pointing nowhere is treated as missing.
    pub fn is_usable(&self) -> bool {
        !self.src.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

// ── Calls to action ─────────────────────────────────────────────────────────

/// A labelled outbound link rendered as a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cta {
    pub label: String,
    pub href: String,
    #[serde(default, alias = "variant")]
    pub emphasis: Emphasis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconKey>,
}

/// Visual weight of a CTA button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    #[default]
    #[serde(alias = "default")]
    Primary,
    Secondary,
    #[serde(alias = "ghost", alias = "link")]
    Quiet,
}

impl Emphasis {
    /// Emphasis by list position: first primary, second secondary, rest quiet.
    pub fn for_position(index: usize) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Secondary,
            _ => Self::Quiet,
        }
    }
}

/// Icon identifiers understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKey {
    Play,
    /// Square arrow pointing out of a box; used for prototypes.
    LinkOut,
    ExternalLink,
    Document,
    Brain,
    Layers,
    Rocket,
    Shield,
    BarChart,
    LineChart,
    Compass,
    GitBranch,
    Users,
    Gauge,
    ClipboardList,
}

// ── Body sections ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconKey>,
    pub label: String,
    #[serde(alias = "copy")]
    pub body: String,
}

/// Most decimals a result is ever rendered with.
pub const MAX_DECIMAL_PRECISION: u32 = 4;

/// A headline metric. `value` is always a finite number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultStat {
    pub label: String,
    pub value: f64,
    pub unit_suffix: String,
    pub decimal_precision: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ResultStat {
    /// Render the value with its precision and suffix, e.g. `8.6/10`.
    pub fn display_value(&self) -> String {
        format!(
            "{:.*}{}",
            self.decimal_precision.min(MAX_DECIMAL_PRECISION) as usize,
            self.value,
            self.unit_suffix
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub title: String,
    pub media: Media,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconKey>,
    pub title: String,
    #[serde(alias = "copy")]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub items: Vec<Cta>,
}

// ── Process ─────────────────────────────────────────────────────────────────

/// Optional deep-dive narrative, keyed by stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Process {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<StageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub findings: Option<StageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<StageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiments: Option<StageContent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<ExtraStage>,
}

/// Stage identifiers, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Sprint,
    Findings,
    Changes,
    Experiments,
    Extra,
}

/// A borrowed view of one populated stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageView<'a> {
    pub kind: StageKind,
    pub id: &'a str,
    pub label: &'a str,
    pub content: &'a StageContent,
}

impl Process {
    /// Populated stages in display order, extensions last.
    pub fn stages(&self) -> Vec<StageView<'_>> {
        let fixed = [
            (StageKind::Sprint, "sprint", "Design Sprint", &self.sprint),
            (StageKind::Findings, "findings", "Findings", &self.findings),
            (StageKind::Changes, "changes", "Changes Shipped", &self.changes),
            (
                StageKind::Experiments,
                "experiments",
                "Next Experiments",
                &self.experiments,
            ),
        ];

        let mut out: Vec<StageView<'_>> = fixed
            .into_iter()
            .filter_map(|(kind, id, label, content)| {
                content.as_ref().map(|content| StageView {
                    kind,
                    id,
                    label,
                    content,
                })
            })
            .collect();

        out.extend(self.extra.iter().map(|x| StageView {
            kind: StageKind::Extra,
            id: &x.id,
            label: &x.label,
            content: &x.content,
        }));
        out
    }

    /// The tab shown first: the earliest populated stage.
    pub fn default_stage(&self) -> Option<&str> {
        self.stages().first().map(|s| s.id)
    }

    pub fn is_empty(&self) -> bool {
        self.stages().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraStage {
    pub id: String,
    pub label: String,
    pub content: StageContent,
}

/// Narrative for one stage: an optional lead paragraph and bullet points.
///
/// Deserializes from either a plain string or a `{ text, items }` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StageContentRepr")]
pub struct StageContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

impl StageContent {
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().is_none_or(|t| t.trim().is_empty())
            && self.items.iter().all(|i| i.trim().is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StageContentRepr {
    Text(String),
    Detailed {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        items: Vec<String>,
    },
}

impl From<StageContentRepr> for StageContent {
    fn from(repr: StageContentRepr) -> Self {
        match repr {
            StageContentRepr::Text(text) => Self {
                text: Some(text),
                items: Vec::new(),
            },
            StageContentRepr::Detailed { text, items } => Self { text, items },
        }
    }
}
