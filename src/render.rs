use chrono::NaiveDate;
use owo_colors::{OwoColorize, Style};

use crate::context::{DetailLookup, Epic, SprintDetail, Timeline};
use crate::layout::{GridSpan, SprintDateInfo, TimelineLayout};

/// Width of the row-label column in characters.
pub const LABEL_WIDTH: usize = 28;

/// Default width of one sprint column in characters.
pub const DEFAULT_CELL_WIDTH: usize = 6;

/// Narrowest sprint column that still fits a two-digit sprint number.
pub const MIN_CELL_WIDTH: usize = 3;

/// Widest sprint column drawn; wider requests are clamped to this.
pub const MAX_CELL_WIDTH: usize = 40;

const MILESTONE_MARKER: &str = "◆";
const SEPARATOR: &str = "│";

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d. %b").to_string()
}

/// `05. Jan → 18. Jan`
pub fn format_date_range(info: &SprintDateInfo) -> String {
    format!("{} → {}", format_date(info.start), format_date(info.end))
}

/// Truncate to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else if width == 0 {
        String::new()
    } else {
        let mut out: String = text.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}

fn pad_right(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width - len))
}

fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let len = text.chars().count();
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - len - left))
}

fn label_cell(text: &str) -> String {
    format!("{} {}", pad_right(text, LABEL_WIDTH), SEPARATOR.bright_black())
}

/// Character offset and width of a grid span inside the sprint area.
fn span_extent(layout: &TimelineLayout<'_>, span: GridSpan, cell_width: usize) -> (usize, usize) {
    let first = layout.geometry.first_sprint_column();
    let start = span.start_column.saturating_sub(first) as usize;
    let end = span.end_column().saturating_sub(first) as usize + 1;
    (start * cell_width, (end - start) * cell_width)
}

fn bar_style(epic: &Epic) -> Style {
    let style = Style::new().bold();
    match epic.rgb() {
        Some((r, g, b)) => style.white().on_truecolor(r, g, b),
        None => style.reversed(),
    }
}

fn swatch(epic: &Epic) -> String {
    match epic.rgb() {
        Some((r, g, b)) => "■".truecolor(r, g, b).to_string(),
        None => "■".to_string(),
    }
}

/// Render the full timeline chart.
///
/// Rows, top to bottom: phase bands, sprint numbers, sprint start dates,
/// one bar per epic, milestone markers, then the milestone list.
pub fn render_timeline(timeline: &Timeline, layout: &TimelineLayout<'_>, cell_width: usize) -> String {
    let cell_width = cell_width.clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH);
    let area_width = (layout.total_sprints as usize).saturating_mul(cell_width);
    let mut out = String::new();

    if let Some(title) = &timeline.title {
        out.push_str(&format!("{}\n", title.purple().bold()));
    }
    if let Some(subtitle) = &timeline.subtitle {
        out.push_str(&format!("{}\n", subtitle.bright_black()));
    }
    if !out.is_empty() {
        out.push('\n');
    }

    if !layout.phases.is_empty() {
        let mut bands: Vec<_> = layout.phases.iter().collect();
        bands.sort_by_key(|b| b.span.start_column);

        let mut line = String::new();
        let mut cursor = 0;
        for band in bands {
            let (offset, width) = span_extent(layout, band.span, cell_width);
            if offset < cursor {
                continue;
            }
            line.push_str(&" ".repeat(offset - cursor));
            line.push_str(&center(&band.phase.label, width).cyan().bold().to_string());
            cursor = offset + width;
        }
        line.push_str(&" ".repeat(area_width.saturating_sub(cursor)));
        out.push_str(&format!("{}{}\n", label_cell("Epic / Focus").bold(), line));
    }

    let numbers: String = layout
        .sprints
        .iter()
        .map(|s| center(&s.number.to_string(), cell_width))
        .collect();
    out.push_str(&format!("{}{}\n", label_cell("Sprint"), numbers.bold()));

    let starts: String = layout
        .sprints
        .iter()
        .map(|s| center(&s.start.format("%d.%m").to_string(), cell_width))
        .collect();
    let duration_label = format!("Starts ({} days each)", timeline.sprint_duration_days);
    out.push_str(&format!("{}{}\n", label_cell(&duration_label), starts.bright_black()));

    for row in &layout.epics {
        let (offset, width) = span_extent(layout, row.span, cell_width);
        let bar = center(row.epic.short_label(), width);
        out.push_str(&format!(
            "{}{}{}{}\n",
            label_cell(&row.epic.title),
            " ".repeat(offset),
            bar.style(bar_style(row.epic)),
            " ".repeat(area_width.saturating_sub(offset + width)),
        ));
    }

    if !layout.milestones.is_empty() {
        let mut markers = vec![' '; area_width];
        for marker in &layout.milestones {
            let index = milestone_column(marker.percent_from_left, area_width);
            if let Some(slot) = markers.get_mut(index) {
                *slot = '◆';
            }
        }
        let markers: String = markers.into_iter().collect();
        out.push_str(&format!("{}{}\n", label_cell("Milestones"), markers.yellow().bold()));

        out.push('\n');
        for marker in &layout.milestones {
            let sprint = marker.milestone.sprint_end;
            let ends = layout
                .sprint(sprint)
                .map(|s| format!(", ends {}", format_date(s.end)))
                .unwrap_or_default();
            out.push_str(&format!(
                "  {} {} {}\n",
                MILESTONE_MARKER.yellow(),
                marker.milestone.label.yellow().bold(),
                format!("(sprint {}{})", sprint, ends).bright_black()
            ));
        }
    }

    out
}

/// Character index of a milestone marker in a sprint area `area_width` wide.
///
/// The marker sits on the last character of its sprint's column.
pub fn milestone_column(percent_from_left: f64, area_width: usize) -> usize {
    let end = (percent_from_left / 100.0 * area_width as f64).round() as usize;
    end.saturating_sub(1).min(area_width.saturating_sub(1))
}

/// Color swatch and label for every epic, in display order.
pub fn render_legend(timeline: &Timeline) -> String {
    if timeline.epics.is_empty() {
        return String::new();
    }

    let mut out = format!("{}\n", "Legend".bold());
    for epic in &timeline.epics {
        out.push_str(&format!("  {} {}\n", swatch(epic), epic.label));
    }
    out
}

/// One line per sprint with its date range and number of active epics.
pub fn render_sprint_list(timeline: &Timeline, layout: &TimelineLayout<'_>) -> String {
    let mut out = String::new();
    for sprint in &layout.sprints {
        let active = timeline.epics_in_sprint(sprint.number).count();
        let has_detail = matches!(timeline.sprints.lookup(sprint.number), DetailLookup::Found(_));
        let marker = if has_detail {
            "●".bright_green().to_string()
        } else {
            "○".bright_black().to_string()
        };
        out.push_str(&format!(
            "{} {:>9}  {}  {}\n",
            marker,
            format!("Sprint {}", sprint.number).bold(),
            format_date_range(sprint),
            format!("{} active epics", active).bright_black()
        ));
    }
    out
}

/// Render the detail page for a sprint, or the placeholder if it has none.
pub fn render_sprint_page(timeline: &Timeline, layout: &TimelineLayout<'_>, sprint: u32) -> String {
    match timeline.sprints.lookup(sprint) {
        DetailLookup::Found(detail) => render_sprint_detail(timeline, layout.sprint(sprint), detail),
        DetailLookup::NotFound(number) => render_placeholder(&number.to_string()),
    }
}

const LABEL: usize = 14;

fn render_sprint_detail(timeline: &Timeline, dates: Option<&SprintDateInfo>, detail: &SprintDetail) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", detail.title.purple().bold()));
    if let Some(dates) = dates {
        out.push_str(&format!("{:LABEL$} {}\n", "Period".bold(), format_date_range(dates)));
    }
    if !detail.metrics.velocity.is_empty() {
        out.push_str(&format!("{:LABEL$} {}\n", "Velocity".bold(), detail.metrics.velocity.cyan()));
    }
    if !detail.metrics.defects.is_empty() {
        out.push_str(&format!("{:LABEL$} {}\n", "Blockers".bold(), detail.metrics.defects.red()));
    }

    if !detail.summary.is_empty() {
        out.push('\n');
        let skin = termimad::MadSkin::default();
        out.push_str(&skin.term_text(&detail.summary).to_string());
    }

    if !detail.focus_areas.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", "Focus areas".bold()));
        for area in &detail.focus_areas {
            out.push_str(&format!("  {} {}\n", "✓".bright_green(), area));
        }
    }

    if !detail.epics.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", "Involved epics".bold()));
        for status in &detail.epics {
            let (label, mark) = match timeline.epic(&status.key) {
                Some(epic) => (epic.label.as_str(), swatch(epic)),
                None => (status.key.as_str(), "■".to_string()),
            };
            out.push_str(&format!(
                "  {} {} {}\n",
                mark,
                label,
                format!("[{}]", status.status).bright_black()
            ));
        }
    }

    out
}

/// Placeholder shown for sprints without a detail record.
pub fn render_placeholder(id: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        "This sprint page is currently under construction.".purple().bold()
    ));
    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        format!("No details are available for sprint '{}' yet. Stay tuned!", id).dimmed()
    ));
    out.push('\n');
    out.push_str(&format!("  Back to the timeline: {}\n", "sprintline show".cyan()));
    out
}
