use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Tabs, Wrap};
use ratatui::Frame;

use crate::tui::constants::APP_VERSION;
use crate::tui::filters::{empty_state, FilterTab, FILTER_TABS};
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, checkbox, inset_rect, progress_label,
    task_title_style, BG_ACCENT, BG_BASE, BG_PANEL, FG_ACCENT,
};

use super::{App, ConfirmChoice, InputMode};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);

        // The gauge row collapses when there is nothing to measure.
        let gauge_height = if self.view.progress().is_some() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(gauge_height),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_tabs(f, chunks[1]);
        self.draw_progress(f, chunks[2]);
        self.draw_body(f, chunks[3]);
        self.draw_footer(f, chunks[4]);

        match self.input_mode {
            InputMode::Add | InputMode::Command => self.draw_input_overlay(f, size),
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::ConfirmDelete => self.draw_confirm_overlay(f, size),
            InputMode::Normal => {}
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let current = FilterTab::for_filter(self.filter).description;
        let left_line = Line::from(vec![
            Span::styled(
                format!(" tasklist v{} ✅ ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("— {}", current)),
            Span::raw("  "),
            Span::styled(
                format!("💾 {}", self.config.db_path().display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(left_line).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        let stats = &self.view.stats;
        let right_line = Line::from(vec![Span::styled(
            format!("{} left ", stats.pending),
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(
            Paragraph::new(right_line)
                .alignment(Alignment::Right)
                .style(Style::default().bg(BG_BASE)),
            cols[1],
        );
    }

    fn draw_tabs(&self, f: &mut Frame<'_>, area: Rect) {
        let titles: Vec<Line> = FILTER_TABS
            .iter()
            .map(|tab| Line::from(tab.title(&self.view.stats)))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.filter.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Filter"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Green)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    }

    fn draw_progress(&self, f: &mut Frame<'_>, area: Rect) {
        let (Some(percent), Some(label)) =
            (self.view.progress(), progress_label(&self.view.stats))
        else {
            return;
        };
        if area.height == 0 {
            return;
        }
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Progress"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .gauge_style(Style::default().fg(Color::Green).bg(BG_ACCENT))
            .percent(u16::from(percent))
            .label(label);
        f.render_widget(gauge, area);
    }

    fn draw_body(&mut self, f: &mut Frame<'_>, area: Rect) {
        if self.view.is_empty() {
            self.draw_empty_state(f, area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("✔"),
            Cell::from("📝 Title"),
            Cell::from("#️⃣ ID"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .view
            .tasks
            .iter()
            .map(|task| {
                Row::new(vec![
                    Cell::from(checkbox(task)),
                    Cell::from(task.title.clone()).style(task_title_style(task)),
                    Cell::from(format!("#{}", task.id))
                        .style(Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(8),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_empty_state(&self, f: &mut Frame<'_>, area: Rect) {
        let (heading, hint) = empty_state(self.filter, &self.view.stats);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = vec![
            Line::from(vec![Span::styled(
                heading,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::default(),
            Line::from(vec![Span::styled(
                hint,
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![Span::styled(
                "Use '/' to explore commands.",
                Style::default().fg(Color::DarkGray),
            )]),
        ];

        let width = inner.width.min(80).max(1);
        let height = (lines.len() as u16).saturating_add(2).min(inner.height);
        let content_area = centered_rect(width, height, inner);
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL)),
            content_area,
        );
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = match &self.status {
            Some(status) => Line::from(vec![Span::styled(status.text.clone(), status.style())]),
            None => Line::from(vec![Span::raw("Ready")]),
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => {
                "tab/shift+tab filter | j/k move | space toggle ✅ | a add ✚ | x delete 🗑️ | / command ⌨️ | h help ❔ | q quit"
            }
            InputMode::Add => "Enter to add ✍️ • Esc to cancel",
            InputMode::Command => {
                "Up/Down navigate • Tab/Right complete • Enter select/run • Esc cancel"
            }
            InputMode::Help => "Enter/Esc to close ❔",
            InputMode::ConfirmDelete => "←/→ choose • Space toggle • Enter confirm • Esc cancel",
        };
        let help_line = Line::from(vec![Span::styled(help, Style::default().fg(Color::DarkGray))]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_input_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(10), 80);
        let extra_height = match self.input_mode {
            InputMode::Command => self.suggestions.len().min(6) as u16 + 1,
            _ => 0,
        };
        let popup_area = centered_rect(width, 3 + extra_height, area);
        f.render_widget(Clear, popup_area);

        let title = match self.input_mode {
            InputMode::Command => "⌨️ Command",
            _ => "➕ Add Task",
        };

        let inner = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(popup_area);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(title))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let input_area = input_block.inner(inner[0]);
        f.render_widget(input_block, inner[0]);
        f.render_widget(
            Paragraph::new(self.input.as_str()).style(Style::default().bg(BG_PANEL)),
            input_area,
        );

        if input_area.width > 0 && input_area.height > 0 {
            let offset = self.input.as_str()[..self.input.cursor()].chars().count() as u16;
            f.set_cursor(
                input_area.x + offset.min(input_area.width - 1),
                input_area.y,
            );
        }

        if self.input_mode != InputMode::Command || inner[1].height == 0 {
            return;
        }

        let mut lines: Vec<Line> = vec![Line::from(vec![Span::styled(
            "Suggestions",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )])];
        for (i, s) in self.suggestions.iter().enumerate() {
            let style = if i == self.suggestion_index {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(s.fill.as_str(), style.add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(s.label.as_str(), Style::default().fg(Color::DarkGray)),
            ]));
        }
        f.render_widget(
            Paragraph::new(lines).style(Style::default().bg(BG_PANEL)),
            inner[1],
        );
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 80);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2)).max(10);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("⌨️ Keyboard Reference"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);
        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let rows: Vec<Row> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Row::new(vec![
                    Cell::from(combo).style(Style::default().fg(FG_ACCENT)),
                    Cell::from(desc),
                ])
            })
            .collect();
        let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(10)])
            .column_spacing(2)
            .style(Style::default().bg(BG_PANEL));
        f.render_widget(table, inset_rect(inner, 1));
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(20), 60).max(40);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("🗑 Confirm Deletion"))
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let task_title = self
            .selected_task()
            .map(|t| t.title.as_str())
            .unwrap_or("selected task");

        let yes_style = if self.confirm_choice == ConfirmChoice::Yes {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };
        let no_style = if self.confirm_choice == ConfirmChoice::No {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let lines = vec![
            Line::from(vec![Span::styled(
                "This action cannot be undone.",
                Style::default().fg(Color::Red),
            )]),
            Line::from(vec![Span::styled(
                format!("Delete '{}'?", task_title),
                Style::default().fg(Color::White),
            )]),
            Line::default(),
            Line::from(vec![
                Span::styled("  Yes  ", yes_style),
                Span::raw("    "),
                Span::styled("  No  ", no_style),
            ]),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }
}
