//! Show command - draws the timeline chart in the terminal.

use crate::context::TimelineContext;
use crate::error_fmt::AppError;
use crate::render::{render_legend, render_timeline};

/// Print the chart followed by the epic legend.
///
/// `cell_width` is clamped by the renderer.
pub fn show(ctx: &TimelineContext, cell_width: usize) -> Result<(), AppError> {
    let layout = super::labelled_layout(ctx)?;

    print!("{}", render_timeline(ctx.timeline(), &layout, cell_width));
    println!();
    print!("{}", render_legend(ctx.timeline()));
    Ok(())
}
