use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Row, Table};

use crate::ui::theme::Theme;

/// Two-column key/value table. Left empty when the snapshot failed.
pub fn render(frame: &mut Frame, area: Rect, rows: &[(&'static str, String)], theme: &Theme) {
    let header = Row::new(vec!["Key", "Value"]).style(
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows.iter().map(|(key, value)| {
        Row::new(vec![key.to_string(), value.clone()])
            .style(Style::default().fg(theme.text_primary))
    });

    let table = Table::new(body, [Constraint::Length(22), Constraint::Min(10)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.overlay_border))
                .title(Span::styled(
                    " System Information ",
                    Style::default()
                        .fg(theme.text_secondary)
                        .add_modifier(Modifier::BOLD),
                )),
        );

    frame.render_widget(table, area);
}
