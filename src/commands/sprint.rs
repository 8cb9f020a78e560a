//! Sprint command - shows the detail page for a single sprint.

use crate::context::{parse_sprint_id, TimelineContext};
use crate::error_fmt::AppError;
use crate::render::{render_placeholder, render_sprint_page};

/// Show the detail record for `id`.
///
/// An unknown or malformed id is not an error: the placeholder page is
/// printed instead and the command succeeds.
pub fn sprint(ctx: &TimelineContext, id: &str) -> Result<(), AppError> {
    let Some(number) = parse_sprint_id(id) else {
        tracing::debug!(id, "sprint id is not a positive integer");
        print!("{}", render_placeholder(id));
        return Ok(());
    };

    let layout = super::labelled_layout(ctx)?;
    print!("{}", render_sprint_page(ctx.timeline(), &layout, number));
    Ok(())
}
