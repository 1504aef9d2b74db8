pub mod input_line;
pub mod list_view;
pub mod modal;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | input line | list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // filter tabs + separator
            Constraint::Length(2), // input line + spacer
            Constraint::Min(1),    // list
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);
    input_line::render_input_line(frame, app, chunks[1]);
    list_view::render_list_view(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    // Modals on top of everything
    match app.mode {
        Mode::View => modal::render_view_modal(frame, app, area),
        Mode::Edit => modal::render_edit_modal(frame, app, area),
        Mode::Confirm => modal::render_delete_modal(frame, app, area),
        Mode::Navigate | Mode::Input => {}
    }
}
