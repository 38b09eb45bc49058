use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Section number prompt opened with ':'
pub struct PromptWidget;

impl PromptWidget {
    pub fn render(frame: &mut Frame, area: Rect, input: &str, total: usize, theme: &Theme) {
        let popup_width = 30u16.min(area.width.saturating_sub(2));
        let popup_height = 3u16.min(area.height);
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" Go to section (1-{}) ", total))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.info))
            .style(Style::default().bg(theme.bg1));

        let line = Line::from(vec![
            Span::styled(":", Style::default().fg(theme.grey1)),
            Span::styled(
                input.to_string(),
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            ),
            Span::styled("_", Style::default().fg(theme.warning)),
        ]);

        frame.render_widget(Paragraph::new(line).block(block), popup_area);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_centered_rect() {
        assert_eq!(
            centered_rect(30, 3, Rect::new(0, 0, 100, 21)),
            Rect::new(35, 9, 30, 3)
        );
        assert_eq!(centered_rect(30, 3, Rect::new(0, 0, 10, 2)).x, 0);
    }

    #[test]
    fn test_renders_typed_number() {
        let mut terminal = Terminal::new(TestBackend::new(100, 21)).unwrap();
        terminal
            .draw(|frame| PromptWidget::render(frame, frame.area(), "4", 5, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let row: String = (35..65).map(|x| buffer[(x, 10)].symbol()).collect();
        assert!(row.contains(":4_"));
    }
}
