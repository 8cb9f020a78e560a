//! Timeline layout engine.
//!
//! Pure functions mapping a validated [`Timeline`] onto a column-per-sprint
//! grid: calendar ranges for each sprint, grid spans for epic bars and phase
//! bands, and horizontal positions for milestone markers. Nothing here holds
//! state; every function returns the same output for the same input.

use chrono::{Days, NaiveDate};

use crate::context::validations::{span_in_bounds, validate_calendar};
use crate::context::{ConfigurationError, Epic, Milestone, Phase, SprintSpan, Timeline, TimelineConfig};

pub use crate::context::validations::validate_timeline_config;

/// Calendar range of one sprint. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintDateInfo {
    pub number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Where a bar sits in the grid. Columns are 1-based, as in CSS grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpan {
    pub start_column: u32,
    pub column_count: u32,
}

impl GridSpan {
    /// Last column covered (inclusive).
    pub fn end_column(&self) -> u32 {
        self.start_column + self.column_count - 1
    }
}

/// Offset between sprint numbers and grid columns.
///
/// A grid may reserve leading columns (row labels) before the first sprint
/// column. Sprint `n` lives in column `leading_columns + n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub leading_columns: u32,
}

impl GridGeometry {
    /// One label column, then one column per sprint.
    pub const LABELLED: GridGeometry = GridGeometry { leading_columns: 1 };
    /// Sprint columns only.
    pub const BARE: GridGeometry = GridGeometry { leading_columns: 0 };

    pub fn first_sprint_column(&self) -> u32 {
        self.leading_columns + 1
    }

    /// Map a sprint span onto grid columns, or None if it leaves the grid.
    pub fn span(&self, span: SprintSpan, total_sprints: u32) -> Option<GridSpan> {
        if !span_in_bounds(span, total_sprints) {
            return None;
        }
        Some(GridSpan {
            start_column: span.start + self.leading_columns,
            column_count: span.duration,
        })
    }

    pub fn epic_span(&self, epic: &Epic, total_sprints: u32) -> Result<GridSpan, ConfigurationError> {
        self.span(epic.sprints, total_sprints)
            .ok_or_else(|| ConfigurationError::EpicSpanOutOfBounds {
                epic_key: epic.key.clone(),
                start: epic.sprints.start,
                duration: epic.sprints.duration,
                total_sprints,
            })
    }

    pub fn phase_span(&self, phase: &Phase, total_sprints: u32) -> Result<GridSpan, ConfigurationError> {
        self.span(phase.sprints, total_sprints)
            .ok_or_else(|| ConfigurationError::PhaseSpanOutOfBounds {
                label: phase.label.clone(),
                start: phase.sprints.start,
                duration: phase.sprints.duration,
                total_sprints,
            })
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::LABELLED
    }
}

/// Calendar ranges for every sprint, in sprint order.
///
/// Sprints are contiguous: each one starts the day after the previous ends.
/// The config must have passed [`validate_timeline_config`].
pub fn compute_sprint_dates(config: &TimelineConfig) -> Vec<SprintDateInfo> {
    let days = u64::from(config.sprint_duration_days);

    (0..config.total_sprints)
        .map(|i| {
            let start = config.start_date + Days::new(u64::from(i) * days);
            let end = start + Days::new(days - 1);
            SprintDateInfo {
                number: i + 1,
                start,
                end,
            }
        })
        .collect()
}

/// Grid span of an epic's bar in a grid with one leading label column.
pub fn compute_epic_grid_span(epic: &Epic, total_sprints: u32) -> Result<GridSpan, ConfigurationError> {
    GridGeometry::LABELLED.epic_span(epic, total_sprints)
}

/// Horizontal position of a milestone as a percentage of the sprint area.
///
/// The marker sits at the end of its sprint, so the result is in `(0, 100]`.
pub fn compute_milestone_position(milestone: &Milestone, total_sprints: u32) -> Result<f64, ConfigurationError> {
    if milestone.sprint_end == 0 || milestone.sprint_end > total_sprints {
        return Err(ConfigurationError::MilestoneOutOfRange {
            label: milestone.label.clone(),
            sprint_end: milestone.sprint_end,
            total_sprints,
        });
    }
    Ok(f64::from(milestone.sprint_end) / f64::from(total_sprints) * 100.0)
}

/// A phase header band.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseBand<'a> {
    pub phase: &'a Phase,
    pub span: GridSpan,
}

/// An epic row with its bar placement.
#[derive(Debug, Clone, PartialEq)]
pub struct EpicRow<'a> {
    pub epic: &'a Epic,
    pub span: GridSpan,
}

/// A milestone with its horizontal position.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneMarker<'a> {
    pub milestone: &'a Milestone,
    pub percent_from_left: f64,
}

/// Everything a renderer needs to draw a timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout<'a> {
    pub geometry: GridGeometry,
    pub total_sprints: u32,
    pub sprints: Vec<SprintDateInfo>,
    pub phases: Vec<PhaseBand<'a>>,
    pub epics: Vec<EpicRow<'a>>,
    pub milestones: Vec<MilestoneMarker<'a>>,
}

impl TimelineLayout<'_> {
    pub fn sprint(&self, number: u32) -> Option<&SprintDateInfo> {
        number
            .checked_sub(1)
            .and_then(|i| self.sprints.get(i as usize))
    }
}

/// Compute the full layout of a timeline for the given grid geometry.
///
/// Epics and phases keep their authored order. The calendar fields are
/// checked before any date is computed; detail records are not inspected.
pub fn compute_layout(timeline: &Timeline, geometry: GridGeometry) -> Result<TimelineLayout<'_>, ConfigurationError> {
    let total = timeline.total_sprints;
    validate_calendar(&timeline.config())?;

    let phases = timeline
        .phases
        .iter()
        .map(|phase| Ok(PhaseBand { phase, span: geometry.phase_span(phase, total)? }))
        .collect::<Result<Vec<_>, ConfigurationError>>()?;

    let epics = timeline
        .epics
        .iter()
        .map(|epic| Ok(EpicRow { epic, span: geometry.epic_span(epic, total)? }))
        .collect::<Result<Vec<_>, ConfigurationError>>()?;

    let milestones = timeline
        .milestones
        .iter()
        .map(|milestone| {
            Ok(MilestoneMarker {
                milestone,
                percent_from_left: compute_milestone_position(milestone, total)?,
            })
        })
        .collect::<Result<Vec<_>, ConfigurationError>>()?;

    let sprints = compute_sprint_dates(&timeline.config());

    tracing::debug!(
        sprints = sprints.len(),
        epics = epics.len(),
        milestones = milestones.len(),
        "computed timeline layout"
    );

    Ok(TimelineLayout {
        geometry,
        total_sprints: total,
        sprints,
        phases,
        epics,
        milestones,
    })
}
