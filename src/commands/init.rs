//! Init command - writes a starter timeline in the current directory.

use std::path::Path;

use owo_colors::OwoColorize;

use crate::context::settings::{BUILTIN_TIMELINE, DEFAULT_CONFIG_FILE};
use crate::error_fmt::{AppError, IoResultExt};

/// Write the built-in timeline to `timeline.yml` inside `dir`.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn init(dir: &Path, force: bool) -> Result<(), AppError> {
    let path = dir.join(DEFAULT_CONFIG_FILE);
    let path_str = path.display().to_string();

    if path.exists() && !force {
        return Err(AppError::ConfigExists(path_str));
    }

    std::fs::write(&path, BUILTIN_TIMELINE).with_context(&format!("failed to write {}", path_str))?;
    tracing::debug!(path = %path_str, force, "wrote starter timeline");

    println!("  {} Created {}", "✓".green(), path_str.cyan());
    println!();
    println!("Get started:");
    println!("  {} - Draw the timeline", "sprintline show".cyan());
    println!("  {} - Validate your edits", "sprintline check".cyan());
    println!("  {} - Write the HTML site", "sprintline build".cyan());
    Ok(())
}
