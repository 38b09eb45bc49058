use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let state = app.engine.state();

        let mode_str = if state.is_mobile {
            "MOBILE"
        } else if app.is_input_mode() {
            "JUMP"
        } else if state.is_animating {
            "MOVING"
        } else {
            "SECTION"
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {} | {}", mode_str, msg),
            None => format!(
                " {} {}/{}",
                mode_str, state.current_section, state.total_sections
            ),
        };

        let help_hint = if state.is_mobile {
            " j/k:scroll :jump q:quit "
        } else {
            " j/k:section gg/G:first/last :jump q:quit "
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, theme.bar_style()),
            Span::styled(" ".repeat(padding_len), theme.bar_style()),
            Span::styled(help_hint, theme.hint_style()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
