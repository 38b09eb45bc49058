use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use fullpage_core::Deck;

use super::text::{center, wrap_text};
use crate::content::SectionContent;
use crate::scroll::SectionFrame;
use crate::theme::Theme;

/// Desktop stage: every visible section drawn as a full-screen card at its
/// tweened offset, lowest z-index first
pub struct StageWidget;

impl StageWidget {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        frames: &[SectionFrame],
        deck: &Deck<SectionContent>,
        theme: &Theme,
    ) {
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new("").style(Style::default().bg(theme.bg0)),
            area,
        );

        for section_frame in frames.iter().filter(|f| f.visible) {
            let Some(descriptor) = deck.get(section_frame.section) else {
                continue;
            };
            let Some(card) = card_rect(area, section_frame) else {
                continue;
            };

            let lines = card_lines(
                section_frame.section,
                deck.total_sections(),
                &descriptor.content,
                area,
                theme,
            );
            let paragraph = Paragraph::new(lines)
                .style(Style::default().bg(theme.section_bg(section_frame.section)))
                .scroll((card.skip_rows, card.skip_cols));

            frame.render_widget(Clear, card.rect);
            frame.render_widget(paragraph, card.rect);
        }
    }
}

/// On-screen part of a section card and how much of it is cut off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRect {
    pub rect: Rect,
    pub skip_rows: u16,
    pub skip_cols: u16,
}

/// Clip a section card, sized like the stage and offset by its frame, to
/// the stage area
pub fn card_rect(area: Rect, section_frame: &SectionFrame) -> Option<CardRect> {
    let height = area.height as i32;
    let width = area.width as i32;
    let y = (section_frame.top_percent / 100.0 * height as f64).round() as i32;
    let x = (section_frame.left_percent / 100.0 * width as f64).round() as i32;

    let top = y.max(0);
    let bottom = (y + height).min(height);
    let left = x.max(0);
    let right = (x + width).min(width);
    if bottom <= top || right <= left {
        return None;
    }

    Some(CardRect {
        rect: Rect::new(
            area.x + left as u16,
            area.y + top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ),
        skip_rows: (top - y) as u16,
        skip_cols: (left - x) as u16,
    })
}

fn card_lines<'a>(
    section: usize,
    total: usize,
    content: &'a SectionContent,
    area: Rect,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let width = area.width as usize;
    let text_width = width.saturating_sub(8).max(1);
    let body = wrap_text(&content.body, text_width);

    // header, title, rule, blank, body
    let content_height = 4 + body.len();
    let pad = (area.height as usize).saturating_sub(content_height) / 2;

    let mut lines = Vec::with_capacity(pad + content_height);
    lines.push(Line::from(Span::styled(
        format!(" {} / {}", section, total),
        Style::default().fg(theme.grey1),
    )));
    lines.extend((1..pad).map(|_| Line::default()));
    lines.push(Line::from(Span::styled(
        center(&content.title, width),
        theme.title_style(),
    )));
    lines.push(Line::from(Span::styled(
        center(&"─".repeat(content.title.chars().count().min(text_width)), width),
        Style::default().fg(theme.accent),
    )));
    lines.push(Line::default());
    lines.extend(
        body.into_iter()
            .map(|l| Line::from(Span::styled(center(&l, width), theme.body_style()))),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::demo_deck;
    use fullpage_core::Layout;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_card_rect_clips() {
        let area = Rect::new(0, 0, 100, 20);
        let half_up = SectionFrame {
            section: 1,
            top_percent: -50.0,
            left_percent: 0.0,
            z_index: 10,
            visible: true,
        };
        let card = card_rect(area, &half_up).unwrap();
        assert_eq!(card.rect, Rect::new(0, 0, 100, 10));
        assert_eq!(card.skip_rows, 10);

        let parked_left = SectionFrame {
            left_percent: -100.0,
            top_percent: 0.0,
            ..half_up
        };
        assert!(card_rect(area, &parked_left).is_none());

        let below = SectionFrame {
            top_percent: 100.0,
            ..half_up
        };
        assert!(card_rect(area, &below).is_none());
    }

    #[test]
    fn test_renders_current_section_on_top() {
        let deck = demo_deck().unwrap();
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

        for current in 1..=5 {
            let mut frames = SectionFrame::resting(&Layout::for_section(current));
            frames.sort_by_key(|f| (f.z_index, f.section));
            terminal
                .draw(|frame| StageWidget::render(frame, frame.area(), &frames, &deck, &theme))
                .unwrap();

            let text = rendered_text(&terminal);
            let title = &deck.get(current).unwrap().content.title;
            assert!(text.contains(title.as_str()), "section {} title missing", current);
            assert!(text.contains(&format!(" {} / 5", current)));
        }
    }
}
