use std::cmp::min;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::{Task, TaskStats};

pub const BG_BASE: Color = Color::Rgb(14, 17, 23);
pub const BG_PANEL: Color = Color::Rgb(22, 26, 34);
pub const BG_ACCENT: Color = Color::Rgb(32, 37, 47);
pub const FG_ACCENT: Color = Color::Rgb(120, 161, 255);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn inset_rect(area: Rect, padding: u16) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let px = padding.min(area.width / 2);
    let py = padding.min(area.height / 2);
    Rect {
        x: area.x + px,
        y: area.y + py,
        width: area.width.saturating_sub(px * 2),
        height: area.height.saturating_sub(py * 2),
    }
}

pub fn checkbox(task: &Task) -> &'static str {
    if task.completed {
        "[✓]"
    } else {
        "[ ]"
    }
}

pub fn task_title_style(task: &Task) -> Style {
    if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Gauge label, `None` when there is nothing to measure.
pub fn progress_label(stats: &TaskStats) -> Option<String> {
    stats.progress().map(|percent| {
        format!(
            "{} of {} done • {}%",
            stats.completed, stats.total, percent
        )
    })
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Tab / Shift+Tab", "Next / previous filter"),
        ("1 / 2 / 3", "Show All / Pending / Completed"),
        ("j / k or ↓ / ↑", "Move selection"),
        ("Home / End", "Jump to first / last task"),
        ("a", "Add a task"),
        ("Space / Enter / t", "Toggle selected task"),
        ("x / Delete", "Delete task (with confirmation)"),
        ("/", "Command palette"),
        ("h", "Toggle this help overlay"),
        ("q / Ctrl+C", "Quit"),
        ("Esc", "Cancel/close overlays"),
    ]
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}
