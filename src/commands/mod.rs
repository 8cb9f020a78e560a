//! CLI command implementations.
//!
//! Each command is implemented in its own submodule and receives the
//! validated TimelineContext built once in `main`.

mod build;
mod check;
mod init;
mod show;
mod sprint;
mod sprints;

pub use build::build;
pub use check::check;
pub use init::init;
pub use show::show;
pub use sprint::sprint;
pub use sprints::sprints;

use crate::context::TimelineContext;
use crate::error_fmt::{AppError, ConfigurationResultExt};
use crate::layout::{compute_layout, GridGeometry, TimelineLayout};

/// Lay out the context's timeline on the labelled grid.
fn labelled_layout(ctx: &TimelineContext) -> Result<TimelineLayout<'_>, AppError> {
    compute_layout(ctx.timeline(), GridGeometry::LABELLED).in_source(ctx.source())
}
