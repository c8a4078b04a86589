use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::{HelpSection, Tab};
use crate::ui::centered_rect;
use crate::ui::theme::Theme;

/// Keybind overlay grouped by section. Sections scoped to another tab are
/// dimmed so the keys that act on `active` stand out.
pub fn render(frame: &mut Frame, area: Rect, sections: &[HelpSection], active: Tab, theme: &Theme) {
    let key_width = sections
        .iter()
        .flat_map(|s| s.entries.iter())
        .map(|(key, _)| key.width())
        .max()
        .unwrap_or(1);

    let mut lines: Vec<Line> = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        let applies = section.scope.is_none_or(|tab| tab == active);
        let (title_fg, desc_fg) = if applies {
            (theme.accent, theme.pill_desc_fg)
        } else {
            (theme.text_secondary, theme.text_secondary)
        };

        lines.push(Line::from(Span::styled(
            format!(" {}", section.title),
            Style::default().fg(title_fg).add_modifier(Modifier::BOLD),
        )));
        for (key, desc) in &section.entries {
            let pad = key_width.saturating_sub(key.width());
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!(" {}{key} ", " ".repeat(pad)),
                    Style::default()
                        .fg(theme.pill_key_fg)
                        .bg(theme.pill_key_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {desc}"), Style::default().fg(desc_fg)),
            ]));
        }
    }

    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let width = (content_width + 4).min(area.width.saturating_sub(4));
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let overlay = centered_rect(width, height, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" Help: {} ", active.title()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(theme.surface_bg)),
        overlay,
    );
}
