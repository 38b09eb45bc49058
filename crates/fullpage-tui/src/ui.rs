use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, Mode};
use crate::widgets::{DocumentFlowWidget, PaginationWidget, PromptWidget, StageWidget, StatusBarWidget};

/// Draw the whole screen: stage or document flow, pagination, status bar
/// and the jump prompt when open
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());
    let stage = chunks[0];

    if app.is_mobile() {
        DocumentFlowWidget::render(frame, stage, &app.deck, app.flow_offset(), &app.theme);
    } else {
        StageWidget::render(frame, stage, &app.frames(), &app.deck, &app.theme);
        PaginationWidget::render(frame, stage, &app.engine.markers(), &app.theme);
    }

    StatusBarWidget::render(frame, chunks[1], app);

    if let Mode::JumpPrompt(input) = &app.mode {
        PromptWidget::render(frame, stage, input, app.deck.total_sections(), &app.theme);
    }
}
