use std::collections::VecDeque;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Sparkline};

use pcmanager::format::format_percent;
use pcmanager::system::sample::ResourceSample;

use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    sample: Option<&ResourceSample>,
    cpu_history: &VecDeque<u64>,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    let (cpu, memory) = sample
        .map(|s| (s.cpu_percent, s.memory_percent))
        .unwrap_or((0.0, 0.0));

    render_gauge(frame, chunks[0], "CPU Usage", cpu, theme);
    render_gauge(frame, chunks[1], "Memory Usage", memory, theme);
    render_cpu_sparkline(frame, chunks[2], cpu_history, theme);
}

fn render_gauge(frame: &mut Frame, area: Rect, label: &str, percent: f32, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(theme.gauge_filled)
                .bg(theme.gauge_unfilled),
        )
        .ratio((f64::from(percent) / 100.0).clamp(0.0, 1.0))
        .label(format!("{label}: {}", format_percent(percent)));

    frame.render_widget(gauge, area);
}

fn render_cpu_sparkline(
    frame: &mut Frame,
    area: Rect,
    cpu_history: &VecDeque<u64>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " CPU History ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let cpu_data: Vec<u64> = cpu_history.iter().copied().collect();
    let sparkline = Sparkline::default()
        .block(block)
        .data(&cpu_data)
        .max(10000)
        .style(Style::default().fg(theme.sparkline_color));

    frame.render_widget(sparkline, area);
}
