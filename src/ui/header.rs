use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Tabs};

use crate::app::Tab;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, active: Tab, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " pcmanager ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ));

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(tab.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(block)
        .select(active.index())
        .style(Style::default().fg(theme.text_secondary))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" | ", Style::default().fg(theme.overlay_border)));

    frame.render_widget(tabs, area);
}
