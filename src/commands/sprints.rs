//! Sprints command - lists every sprint with its date range.

use crate::context::TimelineContext;
use crate::error_fmt::AppError;
use crate::render::render_sprint_list;

pub fn sprints(ctx: &TimelineContext) -> Result<(), AppError> {
    let layout = super::labelled_layout(ctx)?;
    print!("{}", render_sprint_list(ctx.timeline(), &layout));
    Ok(())
}
