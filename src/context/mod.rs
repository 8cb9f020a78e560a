//! Core data model for timelines.
//!
//! This module contains:
//! - `Timeline` - Epics, milestones, phases and sprint configuration
//! - `SprintDetails` - Free-text per-sprint records with `Found | NotFound` lookup
//! - `TimelineContext` - A validated timeline plus where it was loaded from
//! - Configuration loading and validation

pub mod details;
pub mod settings;
mod timeline;
pub(crate) mod validations;

use std::path::Path;

use thiserror::Error;

// Re-export public types
pub use details::{parse_sprint_id, DetailLookup, EpicStatus, SprintDetail, SprintDetails, SprintMetrics};
pub use settings::{SettingsError, TimelineSource};
pub use timeline::{Epic, Milestone, Phase, SprintSpan, Timeline, TimelineConfig};
pub use validations::{validate_timeline_config, ConfigurationError};

/// Errors raised while loading a timeline.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("invalid timeline in {source_name}: {error}")]
    Configuration {
        source_name: TimelineSource,
        error: ConfigurationError,
    },
}

/// Central application context holding a validated timeline.
///
/// The timeline is checked once at load time, so every consumer can call
/// the layout functions without handling bounds errors on the hot path.
/// It is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TimelineContext {
    timeline: Timeline,
    source: TimelineSource,
}

impl TimelineContext {
    /// Wrap an already-parsed timeline, validating it.
    pub fn new(timeline: Timeline, source: TimelineSource) -> Result<Self, LoadError> {
        if let Err(error) = validate_timeline_config(&timeline) {
            return Err(LoadError::Configuration {
                source_name: source,
                error,
            });
        }

        tracing::debug!(
            source = %source,
            sprints = timeline.total_sprints,
            epics = timeline.epics.len(),
            milestones = timeline.milestones.len(),
            "timeline validated"
        );

        Ok(Self { timeline, source })
    }

    /// Resolve, read and validate a timeline.
    ///
    /// `explicit` is a user-supplied path; otherwise `timeline.yml` in `dir`
    /// or the built-in timeline is used.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, LoadError> {
        let source = settings::resolve_source(explicit, dir)?;
        tracing::debug!(source = %source, "resolved timeline source");

        let timeline = settings::read_timeline(&source)?;
        Self::new(timeline, source)
    }

    /// The built-in timeline.
    pub fn builtin() -> Result<Self, LoadError> {
        let source = TimelineSource::Builtin;
        let timeline = settings::read_timeline(&source)?;
        Self::new(timeline, source)
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn source(&self) -> &TimelineSource {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_is_valid() {
        let ctx = TimelineContext::builtin().unwrap();
        assert_eq!(ctx.source(), &TimelineSource::Builtin);
        assert_eq!(ctx.timeline().title.as_deref(), Some("MindMatch Agile Timeline"));
    }

    #[test]
    fn test_builtin_lookup() {
        let ctx = TimelineContext::builtin().unwrap();
        let details = &ctx.timeline().sprints;
        assert!(matches!(details.lookup(3), DetailLookup::Found(d) if d.title.contains("Matching V1")));
        assert_eq!(details.lookup(999), DetailLookup::NotFound(999));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("timeline.yml");
        std::fs::write(
            &path,
            r##"
total_sprints: 13
sprint_duration_days: 14
start_date: "2026-01-05"
epics:
  - { key: late, label: Late, title: Late, color: "#ef4444", sprints: [12, 4] }
"##,
        )
        .unwrap();

        let err = TimelineContext::load(None, temp_dir.path()).unwrap_err();
        match err {
            LoadError::Configuration { source_name, error } => {
                assert_eq!(source_name, TimelineSource::File(path));
                assert!(matches!(error, ConfigurationError::EpicSpanOutOfBounds { .. }));
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.yml");
        std::fs::write(&path, "total_sprints: [").unwrap();

        let err = TimelineContext::load(Some(&path), temp_dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Settings(SettingsError::Parse(_))));
    }
}
