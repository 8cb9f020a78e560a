//! Check command - validates the timeline configuration.

use crate::context::TimelineContext;
use crate::error_fmt::AppError;

/// Report a summary of the timeline.
///
/// Validation already happened when the context was loaded, so reaching
/// this point means the timeline is well-formed. The layout is computed
/// anyway to exercise every span and milestone position.
pub fn check(ctx: &TimelineContext) -> Result<(), AppError> {
    let layout = super::labelled_layout(ctx)?;

    println!(
        "ok: {} epics, {} milestones across {} sprints",
        layout.epics.len(),
        layout.milestones.len(),
        layout.total_sprints
    );
    Ok(())
}
