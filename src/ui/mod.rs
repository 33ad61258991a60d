//! UI module for rendering the TUI

mod components;
mod forms;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    forms::draw(frame, frame.area(), app);
}
