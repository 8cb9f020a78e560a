//! Static HTML rendering of a timeline.
//!
//! Writes `index.html` with the CSS-grid chart and one page per sprint
//! under `sprint/`. Sprints without a detail record get a placeholder page,
//! so every sprint link on the index resolves.

use std::path::{Path, PathBuf};

use minijinja::{context, Environment};
use serde::Serialize;
use thiserror::Error;

use crate::context::{DetailLookup, Epic, SprintDetail, Timeline};
use crate::layout::{GridSpan, SprintDateInfo, TimelineLayout};
use crate::render::format_date_range;

const BASE_TEMPLATE: &str = include_str!("templates/base.html");
const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
const SPRINT_TEMPLATE: &str = include_str!("templates/sprint.html");
const PLACEHOLDER_TEMPLATE: &str = include_str!("templates/placeholder.html");

/// Directory, relative to the site root, holding per-sprint pages.
pub const SPRINT_DIR: &str = "sprint";

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What [`build_site`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
    pub index: PathBuf,
    pub detail_pages: usize,
    pub placeholder_pages: usize,
}

/// Link from the index to a sprint's page.
pub fn sprint_href(sprint: u32) -> String {
    format!("{}/{}.html", SPRINT_DIR, sprint)
}

/// `3 / span 9`
fn grid_column(span: GridSpan) -> String {
    format!("{} / span {}", span.start_column, span.column_count)
}

#[derive(Serialize)]
struct BandView<'a> {
    label: &'a str,
    grid_column: String,
}

#[derive(Serialize)]
struct SprintView {
    number: u32,
    range: String,
    href: String,
}

#[derive(Serialize)]
struct EpicView<'a> {
    title: &'a str,
    label: &'a str,
    short_label: &'a str,
    description: &'a str,
    color: &'a str,
    grid_column: String,
}

#[derive(Serialize)]
struct MilestoneView<'a> {
    sprint_end: u32,
    label: &'a str,
    left: String,
    label_left: String,
}

#[derive(Serialize)]
struct IndexView<'a> {
    title: &'a str,
    subtitle: Option<&'a str>,
    total_sprints: u32,
    sprint_duration_days: u32,
    sprint_area: String,
    phases: Vec<BandView<'a>>,
    sprints: Vec<SprintView>,
    epics: Vec<EpicView<'a>>,
    milestones: Vec<MilestoneView<'a>>,
}

#[derive(Serialize)]
struct EpicStatusView<'a> {
    label: &'a str,
    status: &'a str,
    color: &'a str,
}

#[derive(Serialize)]
struct SprintPageView<'a> {
    title: &'a str,
    range: Option<String>,
    summary: &'a str,
    focus_areas: &'a [String],
    velocity: &'a str,
    defects: &'a str,
    epics: Vec<EpicStatusView<'a>>,
    back_href: &'static str,
}

#[derive(Serialize)]
struct PlaceholderView {
    sprint: u32,
    back_href: &'static str,
}

const BACK_HREF: &str = "../index.html";

fn environment() -> Result<Environment<'static>, SiteError> {
    let mut env = Environment::new();
    env.add_template("base.html", BASE_TEMPLATE)?;
    env.add_template("index.html", INDEX_TEMPLATE)?;
    env.add_template("sprint.html", SPRINT_TEMPLATE)?;
    env.add_template("placeholder.html", PLACEHOLDER_TEMPLATE)?;
    Ok(env)
}

fn index_view<'a>(timeline: &'a Timeline, layout: &TimelineLayout<'a>) -> IndexView<'a> {
    let geometry = layout.geometry;
    let sprint_area = GridSpan {
        start_column: geometry.first_sprint_column(),
        column_count: layout.total_sprints,
    };

    IndexView {
        title: timeline.title.as_deref().unwrap_or("Epic Timeline"),
        subtitle: timeline.subtitle.as_deref(),
        total_sprints: layout.total_sprints,
        sprint_duration_days: timeline.sprint_duration_days,
        sprint_area: grid_column(sprint_area),
        phases: layout
            .phases
            .iter()
            .map(|band| BandView {
                label: &band.phase.label,
                grid_column: grid_column(band.span),
            })
            .collect(),
        sprints: layout
            .sprints
            .iter()
            .map(|s| SprintView {
                number: s.number,
                range: format_date_range(s),
                href: sprint_href(s.number),
            })
            .collect(),
        epics: layout
            .epics
            .iter()
            .map(|row| EpicView {
                title: &row.epic.title,
                label: &row.epic.label,
                short_label: row.epic.short_label(),
                description: &row.epic.description,
                color: &row.epic.color,
                grid_column: grid_column(row.span),
            })
            .collect(),
        milestones: layout
            .milestones
            .iter()
            .map(|m| MilestoneView {
                sprint_end: m.milestone.sprint_end,
                label: &m.milestone.label,
                left: format!("{:.4}", m.percent_from_left),
                label_left: format!("{}px", m.milestone.label_offset_px.saturating_neg()),
            })
            .collect(),
    }
}

fn sprint_view<'a>(
    timeline: &'a Timeline,
    dates: Option<&SprintDateInfo>,
    detail: &'a SprintDetail,
) -> SprintPageView<'a> {
    let epics = detail
        .epics
        .iter()
        .map(|status| {
            let epic: Option<&Epic> = timeline.epic(&status.key);
            EpicStatusView {
                label: epic.map(|e| e.label.as_str()).unwrap_or(status.key.as_str()),
                status: &status.status,
                color: epic.map(|e| e.color.as_str()).unwrap_or("#6b7280"),
            }
        })
        .collect();

    SprintPageView {
        title: &detail.title,
        range: dates.map(format_date_range),
        summary: &detail.summary,
        focus_areas: &detail.focus_areas,
        velocity: &detail.metrics.velocity,
        defects: &detail.metrics.defects,
        epics,
        back_href: BACK_HREF,
    }
}

/// Render the index page.
pub fn render_index(timeline: &Timeline, layout: &TimelineLayout<'_>) -> Result<String, SiteError> {
    let env = environment()?;
    let page = index_view(timeline, layout);
    Ok(env.get_template("index.html")?.render(context! { page => page })?)
}

/// Render the page for one sprint: its detail record, or the placeholder.
pub fn render_sprint(timeline: &Timeline, layout: &TimelineLayout<'_>, sprint: u32) -> Result<String, SiteError> {
    let env = environment()?;
    match timeline.sprints.lookup(sprint) {
        DetailLookup::Found(detail) => {
            let page = sprint_view(timeline, layout.sprint(sprint), detail);
            Ok(env.get_template("sprint.html")?.render(context! { page => page })?)
        }
        DetailLookup::NotFound(sprint) => {
            let page = PlaceholderView {
                sprint,
                back_href: BACK_HREF,
            };
            Ok(env.get_template("placeholder.html")?.render(context! { page => page })?)
        }
    }
}

fn write_page(path: &Path, html: &str) -> Result<(), SiteError> {
    std::fs::write(path, html).map_err(|source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "wrote page");
    Ok(())
}

/// Write the index and every sprint page under `out_dir`.
pub fn build_site(timeline: &Timeline, layout: &TimelineLayout<'_>, out_dir: &Path) -> Result<SiteReport, SiteError> {
    let sprint_dir = out_dir.join(SPRINT_DIR);
    std::fs::create_dir_all(&sprint_dir).map_err(|source| SiteError::Io {
        path: sprint_dir.clone(),
        source,
    })?;

    let index = out_dir.join("index.html");
    write_page(&index, &render_index(timeline, layout)?)?;

    let mut detail_pages = 0;
    let mut placeholder_pages = 0;
    for sprint in &layout.sprints {
        match timeline.sprints.lookup(sprint.number) {
            DetailLookup::Found(_) => detail_pages += 1,
            DetailLookup::NotFound(_) => placeholder_pages += 1,
        }
        let path = sprint_dir.join(format!("{}.html", sprint.number));
        write_page(&path, &render_sprint(timeline, layout, sprint.number)?)?;
    }

    Ok(SiteReport {
        index,
        detail_pages,
        placeholder_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TimelineContext;
    use crate::layout::{compute_layout, GridGeometry};
    use tempfile::TempDir;

    #[test]
    fn test_sprint_href() {
        assert_eq!(sprint_href(7), "sprint/7.html");
    }

    #[test]
    fn test_render_index_grid_placement() {
        let ctx = TimelineContext::builtin().unwrap();
        let layout = compute_layout(ctx.timeline(), GridGeometry::LABELLED).unwrap();
        let html = render_index(ctx.timeline(), &layout).unwrap();

        // Backend epic: sprints [2, 9]
        assert!(html.contains("grid-column: 3 / span 9"));
        // Planning epic covers every sprint
        assert!(html.contains("grid-column: 2 / span 13"));
        assert!(html.contains("grid-template-columns: 280px repeat(13, 1fr);"));
        // Milestone 2 at sprint 6 of 13
        assert!(html.contains("left: 46.1538%"));
        assert!(html.contains("left: 100.0000%"));
        assert!(html.contains("left: -10px"));
        assert!(html.contains("href=\"sprint/13.html\""));
        assert!(html.contains("05. Jan → 18. Jan"));
        assert!(html.contains("Backend Development"));
    }

    #[test]
    fn test_render_index_escapes_text() {
        let ctx = TimelineContext::builtin().unwrap();
        let layout = compute_layout(ctx.timeline(), GridGeometry::LABELLED).unwrap();
        let html = render_index(ctx.timeline(), &layout).unwrap();

        assert!(html.contains("Research &amp; Requirements"));
        assert!(!html.contains("Research & Requirements"));
    }

    #[test]
    fn test_render_sprint_detail_page() {
        let ctx = TimelineContext::builtin().unwrap();
        let layout = compute_layout(ctx.timeline(), GridGeometry::LABELLED).unwrap();
        let html = render_sprint(ctx.timeline(), &layout, 3).unwrap();

        assert!(html.contains("Sprint 3: Matching V1"));
        assert!(html.contains("02. Feb → 15. Feb"));
        assert!(html.contains("30 Story Points"));
        assert!(html.contains("Status: Closing"));
        assert!(html.contains("href=\"../index.html\""));
    }

    #[test]
    fn test_render_sprint_placeholder_page() {
        let ctx = TimelineContext::builtin().unwrap();
        let layout = compute_layout(ctx.timeline(), GridGeometry::LABELLED).unwrap();
        let html = render_sprint(ctx.timeline(), &layout, 999).unwrap();

        assert!(html.contains("under construction"));
        assert!(html.contains("sprint 999"));
    }

    #[test]
    fn test_build_site_writes_every_sprint() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = TimelineContext::builtin().unwrap();
        let layout = compute_layout(ctx.timeline(), GridGeometry::LABELLED).unwrap();

        let report = build_site(ctx.timeline(), &layout, temp_dir.path()).unwrap();

        assert_eq!(report.index, temp_dir.path().join("index.html"));
        assert_eq!(report.detail_pages, 3);
        assert_eq!(report.placeholder_pages, 10);
        assert!(report.index.is_file());
        for n in 1..=13 {
            assert!(temp_dir.path().join(sprint_href(n)).is_file(), "missing page {n}");
        }

        let placeholder = std::fs::read_to_string(temp_dir.path().join("sprint/4.html")).unwrap();
        assert!(placeholder.contains("under construction"));
    }
}
