use std::collections::HashSet;

use chrono::Days;
use thiserror::Error;

use super::timeline::{SprintSpan, Timeline, TimelineConfig};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("timeline must have at least one sprint")]
    NoSprints,
    #[error("sprint duration must be at least one day")]
    ZeroSprintDuration,
    #[error("{total_sprints} sprints of {sprint_duration_days} days run past the last representable date")]
    DateOverflow {
        total_sprints: u32,
        sprint_duration_days: u32,
    },
    #[error("epic key cannot be empty")]
    EmptyEpicKey,
    #[error("duplicate epic key '{0}'")]
    DuplicateEpicKey(String),
    #[error("epic '{epic_key}' has invalid color '{color}' (expected #rrggbb)")]
    InvalidColor { epic_key: String, color: String },
    #[error("epic '{epic_key}' spans sprints [{start}, {duration}] outside 1..={total_sprints}")]
    EpicSpanOutOfBounds {
        epic_key: String,
        start: u32,
        duration: u32,
        total_sprints: u32,
    },
    #[error("phase '{label}' spans sprints [{start}, {duration}] outside 1..={total_sprints}")]
    PhaseSpanOutOfBounds {
        label: String,
        start: u32,
        duration: u32,
        total_sprints: u32,
    },
    #[error("milestone '{label}' targets sprint {sprint_end} outside 1..={total_sprints}")]
    MilestoneOutOfRange {
        label: String,
        sprint_end: u32,
        total_sprints: u32,
    },
    #[error("detail record for sprint {sprint} but timeline has {total_sprints} sprints")]
    DetailForUnknownSprint { sprint: u32, total_sprints: u32 },
    #[error("detail record for sprint {sprint} references unknown epic '{epic_key}'")]
    DetailUnknownEpic { sprint: u32, epic_key: String },
}

/// Whether a span lies entirely within `1..=total_sprints`.
pub(crate) fn span_in_bounds(span: SprintSpan, total_sprints: u32) -> bool {
    span.start >= 1 && span.duration >= 1 && span.last() <= u64::from(total_sprints)
}

/// Checks the scalar calendar fields: sprint count, sprint length, and that
/// the last sprint ends on a representable date.
pub(crate) fn validate_calendar(config: &TimelineConfig) -> Result<(), ConfigurationError> {
    if config.total_sprints == 0 {
        return Err(ConfigurationError::NoSprints);
    }
    if config.sprint_duration_days == 0 {
        return Err(ConfigurationError::ZeroSprintDuration);
    }

    let total_days = u64::from(config.total_sprints) * u64::from(config.sprint_duration_days);
    if config.start_date.checked_add_days(Days::new(total_days)).is_none() {
        return Err(ConfigurationError::DateOverflow {
            total_sprints: config.total_sprints,
            sprint_duration_days: config.sprint_duration_days,
        });
    }
    Ok(())
}

/// Validates a timeline before any layout call.
///
/// Checks that:
/// - There is at least one sprint and sprints last at least one day
/// - The last sprint ends on a representable date
/// - Epic keys are non-empty and unique, and colors are `#rrggbb`
/// - Every epic and phase span lies within the sprint range
/// - Every milestone targets an existing sprint
/// - Detail records only describe existing sprints and configured epics
///
/// Returns the first violation found. Once this passes, the layout
/// functions can be called without re-checking.
pub fn validate_timeline_config(timeline: &Timeline) -> Result<(), ConfigurationError> {
    let total = timeline.total_sprints;
    validate_calendar(&timeline.config())?;

    let mut keys = HashSet::new();
    for epic in &timeline.epics {
        if epic.key.is_empty() {
            return Err(ConfigurationError::EmptyEpicKey);
        }
        if !keys.insert(epic.key.as_str()) {
            return Err(ConfigurationError::DuplicateEpicKey(epic.key.clone()));
        }
        if epic.rgb().is_none() {
            return Err(ConfigurationError::InvalidColor {
                epic_key: epic.key.clone(),
                color: epic.color.clone(),
            });
        }
        if !span_in_bounds(epic.sprints, total) {
            return Err(ConfigurationError::EpicSpanOutOfBounds {
                epic_key: epic.key.clone(),
                start: epic.sprints.start,
                duration: epic.sprints.duration,
                total_sprints: total,
            });
        }
    }

    for phase in &timeline.phases {
        if !span_in_bounds(phase.sprints, total) {
            return Err(ConfigurationError::PhaseSpanOutOfBounds {
                label: phase.label.clone(),
                start: phase.sprints.start,
                duration: phase.sprints.duration,
                total_sprints: total,
            });
        }
    }

    for milestone in &timeline.milestones {
        if milestone.sprint_end == 0 || milestone.sprint_end > total {
            return Err(ConfigurationError::MilestoneOutOfRange {
                label: milestone.label.clone(),
                sprint_end: milestone.sprint_end,
                total_sprints: total,
            });
        }
    }

    for (sprint, detail) in timeline.sprints.iter() {
        if sprint == 0 || sprint > total {
            return Err(ConfigurationError::DetailForUnknownSprint {
                sprint,
                total_sprints: total,
            });
        }
        for status in &detail.epics {
            if !keys.contains(status.key.as_str()) {
                return Err(ConfigurationError::DetailUnknownEpic {
                    sprint,
                    epic_key: status.key.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::details::{EpicStatus, SprintDetail, SprintDetails, SprintMetrics};
    use crate::context::timeline::{Epic, Milestone, Phase};
    use chrono::NaiveDate;

    fn make_epic(key: &str, start: u32, duration: u32) -> Epic {
        Epic {
            key: key.to_string(),
            label: format!("{}: label", key),
            title: format!("{} title", key),
            description: String::new(),
            color: "#3b82f6".to_string(),
            sprints: SprintSpan::new(start, duration),
        }
    }

    fn make_milestone(sprint_end: u32) -> Milestone {
        Milestone {
            sprint_end,
            label: format!("M{}", sprint_end),
            label_offset_px: 100,
        }
    }

    fn make_detail(epic_keys: &[&str]) -> SprintDetail {
        SprintDetail {
            title: "detail".to_string(),
            summary: String::new(),
            focus_areas: vec![],
            epics: epic_keys
                .iter()
                .map(|k| EpicStatus {
                    key: k.to_string(),
                    status: "In Progress".to_string(),
                })
                .collect(),
            metrics: SprintMetrics::default(),
        }
    }

    fn make_timeline(total_sprints: u32) -> Timeline {
        Timeline {
            title: None,
            subtitle: None,
            total_sprints,
            sprint_duration_days: 14,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            phases: vec![],
            epics: vec![],
            milestones: vec![],
            sprints: SprintDetails::new(),
        }
    }

    #[test]
    fn test_validate_valid_timeline() {
        let mut timeline = make_timeline(13);
        timeline.epics = vec![make_epic("a", 1, 13), make_epic("b", 2, 9)];
        timeline.milestones = vec![make_milestone(6), make_milestone(13)];
        timeline.phases = vec![Phase {
            label: "Jan-Feb".to_string(),
            sprints: SprintSpan::new(1, 3),
        }];
        timeline.sprints.insert(1, make_detail(&["a"]));

        assert!(validate_timeline_config(&timeline).is_ok());
    }

    #[test]
    fn test_validate_epic_at_boundary() {
        let mut timeline = make_timeline(13);
        timeline.epics = vec![make_epic("late", 12, 3)];
        // 12 + 3 - 1 = 14 > 13
        assert!(validate_timeline_config(&timeline).is_err());

        timeline.epics = vec![make_epic("late", 11, 3)];
        assert!(validate_timeline_config(&timeline).is_ok());
    }

    #[test]
    fn test_validate_epic_overrun() {
        let mut timeline = make_timeline(13);
        timeline.epics = vec![make_epic("late", 12, 4)];

        assert_eq!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::EpicSpanOutOfBounds {
                epic_key: "late".to_string(),
                start: 12,
                duration: 4,
                total_sprints: 13,
            })
        );
    }

    #[test]
    fn test_validate_epic_sprint_zero() {
        let mut timeline = make_timeline(13);
        timeline.epics = vec![make_epic("early", 0, 2)];

        assert!(matches!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::EpicSpanOutOfBounds { epic_key, .. }) if epic_key == "early"
        ));
    }

    #[test]
    fn test_validate_epic_zero_duration() {
        let mut timeline = make_timeline(13);
        timeline.epics = vec![make_epic("empty", 3, 0)];

        assert!(matches!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::EpicSpanOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_epic_key() {
        let mut timeline = make_timeline(13);
        timeline.epics = vec![make_epic("a", 1, 2), make_epic("a", 3, 2)];

        assert_eq!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::DuplicateEpicKey("a".to_string()))
        );
    }

    #[test]
    fn test_validate_empty_epic_key() {
        let mut timeline = make_timeline(13);
        timeline.epics = vec![make_epic("", 1, 2)];

        assert_eq!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::EmptyEpicKey)
        );
    }

    #[test]
    fn test_validate_invalid_color() {
        let mut timeline = make_timeline(13);
        let mut epic = make_epic("a", 1, 2);
        epic.color = "blue".to_string();
        timeline.epics = vec![epic];

        assert!(matches!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::InvalidColor { color, .. }) if color == "blue"
        ));
    }

    #[test]
    fn test_validate_milestone_out_of_range() {
        let mut timeline = make_timeline(13);
        timeline.milestones = vec![make_milestone(14)];
        assert!(matches!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::MilestoneOutOfRange { sprint_end: 14, .. })
        ));

        timeline.milestones = vec![make_milestone(0)];
        assert!(matches!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::MilestoneOutOfRange { sprint_end: 0, .. })
        ));
    }

    #[test]
    fn test_validate_phase_out_of_bounds() {
        let mut timeline = make_timeline(13);
        timeline.phases = vec![Phase {
            label: "Jun-Jul".to_string(),
            sprints: SprintSpan::new(12, 3),
        }];

        assert!(matches!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::PhaseSpanOutOfBounds { label, .. }) if label == "Jun-Jul"
        ));
    }

    #[test]
    fn test_validate_no_sprints() {
        let timeline = make_timeline(0);
        assert_eq!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::NoSprints)
        );
    }

    #[test]
    fn test_validate_zero_duration() {
        let mut timeline = make_timeline(13);
        timeline.sprint_duration_days = 0;
        assert_eq!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::ZeroSprintDuration)
        );
    }

    #[test]
    fn test_validate_date_overflow() {
        let mut timeline = make_timeline(u32::MAX);
        timeline.sprint_duration_days = u32::MAX;
        assert!(matches!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::DateOverflow { .. })
        ));
    }

    #[test]
    fn test_validate_detail_for_unknown_sprint() {
        let mut timeline = make_timeline(13);
        timeline.sprints.insert(14, make_detail(&[]));

        assert_eq!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::DetailForUnknownSprint {
                sprint: 14,
                total_sprints: 13,
            })
        );
    }

    #[test]
    fn test_validate_detail_unknown_epic() {
        let mut timeline = make_timeline(13);
        timeline.epics = vec![make_epic("a", 1, 2)];
        timeline.sprints.insert(1, make_detail(&["a", "ghost"]));

        assert_eq!(
            validate_timeline_config(&timeline),
            Err(ConfigurationError::DetailUnknownEpic {
                sprint: 1,
                epic_key: "ghost".to_string(),
            })
        );
    }
}
