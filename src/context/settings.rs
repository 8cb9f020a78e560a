//! Timeline configuration sources.
//!
//! A timeline is read from a YAML file (`timeline.yml` by default) or, when
//! no file is present, from the copy compiled into the binary.

use std::path::{Path, PathBuf};

use super::Timeline;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "timeline.yml";

/// The built-in timeline, also written out by `sprintline init`.
pub const BUILTIN_TIMELINE: &str = include_str!("builtin.yml");

/// Where a timeline was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineSource {
    Builtin,
    File(PathBuf),
}

impl std::fmt::Display for TimelineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineSource::Builtin => write!(f, "built-in timeline"),
            TimelineSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Errors that can occur when reading a timeline file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read timeline file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse timeline: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("timeline file '{}' not found", .0.display())]
    MissingFile(PathBuf),
}

/// Decide which source to load.
///
/// An explicit path always wins and must exist. Otherwise `timeline.yml` in
/// `dir` is used if present, falling back to the built-in timeline.
pub fn resolve_source(explicit: Option<&Path>, dir: &Path) -> Result<TimelineSource, SettingsError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(SettingsError::MissingFile(path.to_path_buf()));
        }
        return Ok(TimelineSource::File(path.to_path_buf()));
    }

    let default_path = dir.join(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        Ok(TimelineSource::File(default_path))
    } else {
        Ok(TimelineSource::Builtin)
    }
}

/// Read and parse a timeline from the given source. Does not validate.
pub fn read_timeline(source: &TimelineSource) -> Result<Timeline, SettingsError> {
    let content = match source {
        TimelineSource::Builtin => return Ok(Timeline::from_yaml(BUILTIN_TIMELINE)?),
        TimelineSource::File(path) => match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SettingsError::MissingFile(path.clone()));
            }
            Err(e) => return Err(SettingsError::Io(e)),
        },
    };

    tracing::debug!(source = %source, bytes = content.len(), "parsing timeline");
    Ok(Timeline::from_yaml(&content)?)
}
