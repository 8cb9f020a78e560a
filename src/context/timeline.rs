use chrono::NaiveDate;
use serde::Deserialize;

use super::details::SprintDetails;

/// A contiguous run of sprints, authored as `[start, duration]`.
///
/// Both values are 1-indexed sprint units; bounds are checked by validation,
/// not by construction.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(from = "(u32, u32)")]
pub struct SprintSpan {
    pub start: u32,
    pub duration: u32,
}

impl SprintSpan {
    pub fn new(start: u32, duration: u32) -> Self {
        Self { start, duration }
    }

    /// Last sprint covered by the span (inclusive).
    ///
    /// Computed in u64 so absurd authored values cannot overflow.
    pub fn last(&self) -> u64 {
        (u64::from(self.start) + u64::from(self.duration)).saturating_sub(1)
    }

    /// Whether the span covers the given sprint number.
    pub fn covers(&self, sprint: u32) -> bool {
        self.duration > 0 && sprint >= self.start && u64::from(sprint) <= self.last()
    }
}

impl From<(u32, u32)> for SprintSpan {
    fn from((start, duration): (u32, u32)) -> Self {
        Self { start, duration }
    }
}

/// A large unit of work drawn as one bar across its sprints.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Epic {
    pub key: String,
    pub label: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `#rrggbb`
    pub color: String,
    pub sprints: SprintSpan,
}

impl Epic {
    /// The label without its `E1: ` style prefix, used as text on the bar.
    pub fn short_label(&self) -> &str {
        match self.label.split_once(": ") {
            Some((_, rest)) => rest,
            None => &self.label,
        }
    }

    /// Parsed bar color, or None if `color` is not `#rrggbb`.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// A named marker attached to the end of a sprint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Milestone {
    pub sprint_end: u32,
    pub label: String,
    /// Hand-tuned label nudge for the HTML view. Carried through untouched.
    #[serde(default)]
    pub label_offset_px: i32,
}

/// A header band grouping several sprint columns (e.g. "Jan-Feb").
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Phase {
    pub label: String,
    pub sprints: SprintSpan,
}

/// The scalar part of a timeline: how many sprints, how long, from when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineConfig {
    pub total_sprints: u32,
    pub sprint_duration_days: u32,
    pub start_date: NaiveDate,
}

/// A complete timeline as authored in `timeline.yml`.
///
/// Constructed once at startup, validated, then only ever read.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Timeline {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub total_sprints: u32,
    pub sprint_duration_days: u32,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub epics: Vec<Epic>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Free-text detail records keyed by sprint number.
    #[serde(default)]
    pub sprints: SprintDetails,
}

impl Timeline {
    pub fn config(&self) -> TimelineConfig {
        TimelineConfig {
            total_sprints: self.total_sprints,
            sprint_duration_days: self.sprint_duration_days,
            start_date: self.start_date,
        }
    }

    pub fn epic(&self, key: &str) -> Option<&Epic> {
        self.epics.iter().find(|e| e.key == key)
    }

    /// Epics active during the given sprint, in display order.
    pub fn epics_in_sprint(&self, sprint: u32) -> impl Iterator<Item = &Epic> {
        self.epics.iter().filter(move |e| e.sprints.covers(sprint))
    }

    /// Parse a timeline from YAML without validating it.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
