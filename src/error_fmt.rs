use std::fmt;
use std::io;

use owo_colors::OwoColorize;

use crate::context::{ConfigurationError, LoadError, SettingsError, TimelineSource};
use crate::site::SiteError;

/// Application error with context for actionable error messages.
#[derive(Debug)]
pub enum AppError {
    /// Reading or parsing the timeline file failed
    Settings(SettingsError),
    /// The timeline was read but its contents are inconsistent
    Configuration {
        source_name: TimelineSource,
        error: ConfigurationError,
    },
    /// IO error with context
    Io { context: String, source: io::Error },
    /// Site generation failed
    Site(SiteError),
    /// `init` would overwrite an existing file
    ConfigExists(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Settings(source) => write!(f, "{}", format_settings_error(source)),
            AppError::Configuration { source_name, error } => {
                write!(f, "{}", format_configuration_error(error, source_name))
            }
            AppError::Io { context, source } => {
                write!(f, "{}", format_cli_error(&format!("{}: {}", context, source)))
            }
            AppError::Site(source) => write!(f, "{}", format_site_error(source)),
            AppError::ConfigExists(path) => write!(f, "{}", format_config_exists(path)),
        }
    }
}

impl std::error::Error for AppError {}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Settings(source) => AppError::Settings(source),
            LoadError::Configuration { source_name, error } => AppError::Configuration { source_name, error },
        }
    }
}

impl From<SiteError> for AppError {
    fn from(e: SiteError) -> Self {
        AppError::Site(e)
    }
}

/// Extension trait to add the timeline source to configuration results.
pub trait ConfigurationResultExt<T> {
    fn in_source(self, source: &TimelineSource) -> Result<T, AppError>;
}

impl<T> ConfigurationResultExt<T> for Result<T, ConfigurationError> {
    fn in_source(self, source: &TimelineSource) -> Result<T, AppError> {
        self.map_err(|error| AppError::Configuration {
            source_name: source.clone(),
            error,
        })
    }
}

/// Extension trait to add context to IO results.
pub trait IoResultExt<T> {
    fn with_context(self, context: &str) -> Result<T, AppError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn with_context(self, context: &str) -> Result<T, AppError> {
        self.map_err(|e| AppError::Io {
            context: context.to_string(),
            source: e,
        })
    }
}

// ============================================================================
// Formatting functions (internal implementation)
// ============================================================================

fn error_prefix() -> String {
    format!("{}: ", "error".red().bold())
}

fn format_settings_error(error: &SettingsError) -> String {
    let mut out = error_prefix();

    match error {
        SettingsError::MissingFile(path) => {
            out.push_str(&format!(
                "timeline file {} not found\n",
                path.display().to_string().cyan()
            ));
            out.push('\n');
            out.push_str(&format!("  {}:\n", "To fix this".bold()));
            out.push_str("    1. Check the path passed to --config or SPRINTLINE_CONFIG\n");
            out.push_str(&format!(
                "    2. Run {} to write the built-in timeline as a starting point\n",
                "sprintline init".cyan()
            ));
        }
        SettingsError::Parse(yaml_err) => {
            out.push_str("invalid timeline YAML\n");
            out.push('\n');
            out.push_str(&format!("  {}\n", yaml_err.to_string().dimmed()));
            out.push('\n');
            out.push_str(&format!(
                "  {}\n",
                "Epic and phase spans are written as [start sprint, duration].".dimmed()
            ));
        }
        SettingsError::Io(e) => {
            out.push_str(&format!("failed to read timeline file: {}\n", e));
        }
    }

    out
}

fn format_configuration_error(error: &ConfigurationError, source: &TimelineSource) -> String {
    let mut out = error_prefix();
    let source_name = source.to_string();

    out.push_str(&format!("{}\n", error));
    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        format!("The timeline in {} cannot be laid out.", source_name).dimmed()
    ));
    out.push('\n');
    out.push_str(&format!("  {}:\n", "To fix this".bold()));

    match error {
        ConfigurationError::NoSprints => {
            out.push_str(&format!("    Set {} to 1 or more\n", "total_sprints".cyan()));
        }
        ConfigurationError::ZeroSprintDuration => {
            out.push_str(&format!("    Set {} to 1 or more\n", "sprint_duration_days".cyan()));
        }
        ConfigurationError::DateOverflow { .. } => {
            out.push_str(&format!(
                "    Reduce {} or {}\n",
                "total_sprints".cyan(),
                "sprint_duration_days".cyan()
            ));
        }
        ConfigurationError::EmptyEpicKey => {
            out.push_str(&format!("    Give every epic a non-empty {}\n", "key".cyan()));
        }
        ConfigurationError::DuplicateEpicKey(key) => {
            out.push_str(&format!("    Rename one of the epics keyed '{}'\n", key.yellow()));
        }
        ConfigurationError::InvalidColor { epic_key, .. } => {
            out.push_str(&format!(
                "    Use a {} color such as {} for epic '{}'\n",
                "#rrggbb".cyan(),
                "\"#3b82f6\"".cyan(),
                epic_key.yellow()
            ));
        }
        ConfigurationError::EpicSpanOutOfBounds {
            epic_key,
            start,
            total_sprints,
            ..
        } => {
            let max_duration = (u64::from(*total_sprints) + 1).saturating_sub(u64::from(*start));
            out.push_str(&format!(
                "    1. Shorten epic '{}' so start + duration - 1 <= {}\n",
                epic_key.yellow(),
                total_sprints
            ));
            if *start >= 1 && max_duration > 0 {
                out.push_str(&format!(
                    "       (starting at sprint {} it can last at most {} sprints)\n",
                    start, max_duration
                ));
            }
            out.push_str(&format!("    2. Or raise {}\n", "total_sprints".cyan()));
        }
        ConfigurationError::PhaseSpanOutOfBounds { label, total_sprints, .. } => {
            out.push_str(&format!(
                "    Keep phase '{}' within sprints 1..={}\n",
                label.yellow(),
                total_sprints
            ));
        }
        ConfigurationError::MilestoneOutOfRange { label, total_sprints, .. } => {
            out.push_str(&format!(
                "    Point milestone '{}' at a sprint between 1 and {}\n",
                label.yellow(),
                total_sprints
            ));
        }
        ConfigurationError::DetailForUnknownSprint { sprint, .. } => {
            out.push_str(&format!(
                "    Remove the detail record for sprint {} from {}\n",
                sprint.to_string().yellow(),
                "sprints".cyan()
            ));
        }
        ConfigurationError::DetailUnknownEpic { sprint, epic_key } => {
            out.push_str(&format!(
                "    1. Add an epic keyed '{}' to {}\n",
                epic_key.yellow(),
                "epics".cyan()
            ));
            out.push_str(&format!(
                "    2. Or remove it from the detail record of sprint {}\n",
                sprint
            ));
        }
    }

    out
}

fn format_site_error(error: &SiteError) -> String {
    let mut out = error_prefix();
    match error {
        SiteError::Template(e) => {
            out.push_str("failed to render page\n");
            out.push('\n');
            out.push_str(&format!("  {}\n", e.to_string().dimmed()));
        }
        SiteError::Io { path, source } => {
            out.push_str(&format!(
                "failed to write {}: {}\n",
                path.display().to_string().cyan(),
                source
            ));
        }
    }
    out
}

fn format_config_exists(path: &str) -> String {
    let mut out = error_prefix();
    out.push_str(&format!("{} already exists\n", path.cyan()));
    out.push('\n');
    out.push_str(&format!("  {}:\n", "To fix this".bold()));
    out.push_str(&format!("    Pass {} to overwrite it\n", "--force".cyan()));
    out
}

fn format_cli_error(message: &str) -> String {
    format!("{}{}\n", error_prefix(), message)
}
