pub mod dialog;
pub mod header;
pub mod help;
pub mod processes;
pub mod resources;
pub mod statusbar;
pub mod system_info;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::app::{App, Tab};

pub fn draw(frame: &mut Frame, app: &App) {
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.surface_bg)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], app.tab, &app.theme);

    match app.tab {
        Tab::SystemInfo => system_info::render(frame, chunks[1], &app.system_rows, &app.theme),
        Tab::Processes => {
            processes::render(frame, chunks[1], &app.processes, app.selected, &app.theme)
        }
        Tab::Resources => resources::render(
            frame,
            chunks[1],
            app.latest_sample.as_ref(),
            &app.cpu_history,
            &app.theme,
        ),
    }

    statusbar::render(
        frame,
        chunks[2],
        app.input_mode(),
        app.tab,
        app.selected_process(),
        &app.keybinds,
        &app.theme,
    );

    // Overlays are rendered last to appear on top
    if app.help_open {
        help::render(frame, frame.area(), &app.help_sections(), app.tab, &app.theme);
    }
    if let Some(dialog) = app.current_dialog() {
        dialog::render(frame, frame.area(), dialog, app.dialogs.len(), &app.theme);
    }
}

/// A `width` x `height` rect centred in `area`, shared by the overlays.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vert] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [horiz] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vert);
    horiz
}
