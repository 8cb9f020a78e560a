//! Build command - writes the static HTML site.

use std::path::Path;

use owo_colors::OwoColorize;

use crate::context::TimelineContext;
use crate::error_fmt::AppError;
use crate::site::build_site;

pub fn build(ctx: &TimelineContext, out_dir: &Path) -> Result<(), AppError> {
    let layout = super::labelled_layout(ctx)?;
    let report = build_site(ctx.timeline(), &layout, out_dir)?;

    println!("  {} Wrote {}", "✓".green(), report.index.display().to_string().cyan());
    println!(
        "  {} Wrote {} sprint pages ({} with details, {} placeholders)",
        "✓".green(),
        report.detail_pages + report.placeholder_pages,
        report.detail_pages,
        report.placeholder_pages
    );
    Ok(())
}
