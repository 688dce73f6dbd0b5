//! UI module for rendering the TUI

mod components;
mod donations;
mod forms;
mod layout;

use crate::app::App;
use crate::state::{DraftStorage, View};
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw<S: DraftStorage>(frame: &mut Frame, app: &App<S>) {
    let view = app.state.current_view;
    let (header_area, main_area, status_area) = layout::create_layout(frame.area(), view);

    match view {
        View::Wizard => {
            layout::draw_stepper(frame, header_area, app.current_step());
            forms::draw_wizard(frame, main_area, app);
        }
        View::Donations => donations::draw_list(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog overlays everything
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}
