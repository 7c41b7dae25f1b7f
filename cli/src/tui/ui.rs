use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, Tabs},
    Frame,
};
use pinkfit_core::time::{display_date, list_label};
use pinkfit_core::{HistoryPeriod, Metric, RecordRepository};
use unicode_width::UnicodeWidthStr;

use crate::history::stats_line;
use crate::tui::app::{App, Field, Tab};

// --- THEME ---
const PRIMARY: Color = Color::LightRed;
const MUTED: Color = Color::DarkGray;
const TEXT: Color = Color::White;

pub fn draw<R: RecordRepository>(f: &mut Frame, app: &App<R>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    draw_tabs(f, app, main_chunks[0]);
    match app.tab {
        Tab::Input => draw_input(f, app, main_chunks[1]),
        Tab::History => draw_history(f, app, main_chunks[1]),
    }

    let help = match app.tab {
        Tab::Input => "↑/↓: Field | Enter: Save | Tab: History | Esc: Quit",
        Tab::History => "←/→: Period | m: Metric | i: Input | Tab: Input | q: Quit",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(MUTED))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);

    if let Some(toast) = &app.toast {
        draw_toast(f, &toast.message, size);
    }
}

fn draw_tabs<R: RecordRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let selected = match app.tab {
        Tab::Input => 0,
        Tab::History => 1,
    };
    let tabs = Tabs::new(vec![" Daily record ", " History "])
        .select(selected)
        .style(Style::default().fg(MUTED))
        .highlight_style(Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(" PINKFIT ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(tabs, area);
}

fn draw_input<R: RecordRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Date
            Constraint::Length(3), // Weight
            Constraint::Length(3), // Body fat
            Constraint::Min(1),    // Hints
        ])
        .split(area);

    let date = Paragraph::new(Span::styled(
        display_date(app.today),
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(date, chunks[0]);

    draw_field(f, " Weight (kg) ", &app.weight, app.focus == Field::Weight, chunks[1]);
    draw_field(f, " Body fat (%) ", &app.body_fat, app.focus == Field::BodyFat, chunks[2]);

    let mut hints = vec![Line::from(Span::styled(
        "One record per day; saving again overwrites today's entry.",
        Style::default().fg(MUTED),
    ))];
    if !app.is_update {
        hints.push(Line::from(""));
        hints.push(Line::from(Span::styled(
            "Start logging today and watch your progress.",
            Style::default().fg(TEXT),
        )));
    }
    f.render_widget(Paragraph::new(hints).alignment(Alignment::Center), chunks[3]);

    // Cursor at the end of the focused field
    let field_area = match app.focus {
        Field::Weight => chunks[1],
        Field::BodyFat => chunks[2],
    };
    let offset = app.focused_value().width() as u16;
    f.set_cursor_position(Position::new(field_area.x + 1 + offset, field_area.y + 1));
}

fn draw_field(f: &mut Frame, title: &str, value: &str, focused: bool, area: Rect) {
    let border = if focused { PRIMARY } else { MUTED };
    let field = Paragraph::new(value).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(field, area);
}

fn draw_history<R: RecordRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Period selector
            Constraint::Length(1),      // Metric + stats
            Constraint::Percentage(55), // Chart
            Constraint::Min(3),         // List
        ])
        .split(area);

    f.render_widget(Paragraph::new(period_selector(app.period)), chunks[0]);

    let report = &app.report;
    let summary = match &report.stats {
        Some(stats) => format!(" {}: {}", report.metric.label(), stats_line(stats, report.metric)),
        None => format!(" {}", report.metric.label()),
    };
    f.render_widget(Paragraph::new(summary).style(Style::default().fg(TEXT)), chunks[1]);

    if report.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("No records in this period."),
            Line::from(Span::styled("Press i to go to input", Style::default().fg(PRIMARY))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        f.render_widget(empty, chunks[2]);
        return;
    }

    draw_chart(f, app, chunks[2]);
    draw_list(f, app, chunks[3]);
}

fn period_selector(current: HistoryPeriod) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for period in HistoryPeriod::ALL {
        let style = if period == current {
            Style::default().fg(Color::Black).bg(PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(PRIMARY)
        };
        spans.push(Span::styled(format!(" {} ", period.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn draw_chart<R: RecordRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let report = &app.report;
    let points: Vec<(f64, f64)> = report
        .series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    let (min, max) = match &report.stats {
        Some(stats) => (stats.min, stats.max),
        None => return,
    };
    let pad = ((max - min) * 0.1).max(0.5);
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    // First and last labels only, like a "preserve start/end" axis
    let first = report.series.first().map(|p| p.short_label.clone()).unwrap_or_default();
    let last = report.series.last().map(|p| p.short_label.clone()).unwrap_or_default();
    let x_labels = if report.series.len() > 1 { vec![first, last] } else { vec![first] };

    let dataset = Dataset::default()
        .name(metric_name(report.metric))
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(PRIMARY))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(MUTED)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([min - pad, max + pad])
                .labels(vec![format!("{:.1}", min - pad), format!("{:.1}", max + pad)]),
        );

    f.render_widget(chart, area);
}

fn metric_name(metric: Metric) -> String {
    format!("{} ({})", metric.label(), metric.unit())
}

fn draw_list<R: RecordRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let rows: Vec<Row> = app
        .report
        .recent_first()
        .map(|point| {
            Row::new(vec![
                Span::styled(list_label(point.date), Style::default().fg(MUTED)),
                Span::raw(format!("{} kg", point.record.weight)),
                Span::raw(format!("{} %", point.record.body_fat)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(14), // Date
            Constraint::Length(12), // Weight
            Constraint::Min(8),     // Body fat
        ],
    )
    .header(Row::new(vec!["Date", "Weight", "Body fat"]).style(Style::default().fg(PRIMARY)))
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));

    f.render_widget(table, area);
}

fn draw_toast(f: &mut Frame, message: &str, area: Rect) {
    let width = (message.width() as u16 + 4).min(area.width);
    let toast_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + 1,
        width,
        height: 3u16.min(area.height),
    };

    let toast = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT).bg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));

    f.render_widget(Clear, toast_area);
    f.render_widget(toast, toast_area);
}
