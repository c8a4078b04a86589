use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use pcmanager::format::{format_megabytes, truncate_unicode};
use pcmanager::system::process::ProcessRecord;

use crate::app::{InputMode, ResolvedKeybinds, Tab, key_label};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    tab: Tab,
    selected: Option<&ProcessRecord>,
    keybinds: &ResolvedKeybinds,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let line = match input_mode {
        InputMode::Dialog => Line::from(pill_spans("Enter".into(), "Dismiss", theme)),
        InputMode::Help => Line::from(pill_spans("Esc".into(), "Close help", theme)),
        InputMode::Normal => {
            let mut spans = Vec::new();
            spans.extend(pill_spans(key_label(keybinds.quit), "Quit", theme));
            spans.extend(pill_spans(key_label(keybinds.next_tab), "Tab", theme));
            if tab == Tab::Processes {
                spans.extend(pill_spans(key_label(keybinds.kill), "End", theme));
                spans.extend(pill_spans(key_label(keybinds.refresh), "Refresh", theme));
            }
            spans.extend(pill_spans(key_label(keybinds.optimize), "Optimize", theme));
            spans.extend(pill_spans(key_label(keybinds.help), "Help", theme));
            if tab == Tab::Processes
                && let Some(process) = selected
            {
                let label = format!(
                    "  {} ({}) {}",
                    truncate_unicode(&process.name, 24),
                    process.pid,
                    format_megabytes(process.memory_bytes)
                );
                spans.push(Span::styled(
                    label,
                    Style::default()
                        .fg(theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line).style(bg_style), area);
}

fn pill_spans(key: String, desc: &str, theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
