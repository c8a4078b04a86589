use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::app::{Dialog, DialogKind};
use crate::ui::centered_rect;
use crate::ui::theme::Theme;

/// Modal message box. `pending` counts this dialog plus any queued behind it.
pub fn render(frame: &mut Frame, area: Rect, dialog: &Dialog, pending: usize, theme: &Theme) {
    let accent = match dialog.kind {
        DialogKind::Info => theme.status_ok,
        DialogKind::Warning => theme.status_warn,
        DialogKind::Error => theme.status_err,
    };

    let max_width = area.width.saturating_sub(4).max(1);
    let width = (dialog.message.width() as u16 + 4).clamp(30.min(max_width), max_width);
    let text_width = width.saturating_sub(2).max(1) as usize;
    let text_lines = dialog.message.width().div_ceil(text_width).max(1) as u16;
    let height = (text_lines + 4).min(area.height.saturating_sub(2));

    let overlay = centered_rect(width, height, area);
    frame.render_widget(Clear, overlay);

    let mut title = format!(" {} ", dialog.title);
    if pending > 1 {
        title = format!(" {} (1/{pending}) ", dialog.title);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(Span::styled(
            dialog.message.as_str(),
            Style::default().fg(theme.text_primary),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] OK",
            Style::default().fg(theme.text_secondary),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(theme.surface_bg)),
        overlay,
    );
}
