use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use fullpage_core::Deck;

use super::text::wrap_text;
use crate::content::SectionContent;
use crate::theme::Theme;

/// Line layout of the stacked mobile document at one width
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowMetrics {
    pub width: u16,
    pub total_lines: u16,
    /// First line of each section, in section order
    pub section_offsets: Vec<u16>,
}

impl FlowMetrics {
    /// Largest scroll offset that still fills a viewport of `height` lines
    pub fn max_offset(&self, height: u16) -> u16 {
        self.total_lines.saturating_sub(height)
    }

    /// First line of a 1-based section
    pub fn offset_of(&self, section: usize) -> Option<u16> {
        section
            .checked_sub(1)
            .and_then(|i| self.section_offsets.get(i))
            .copied()
    }
}

/// Mobile layout: sections as ordinary blocks in one scrolling document
pub struct DocumentFlowWidget;

impl DocumentFlowWidget {
    pub fn measure(deck: &Deck<SectionContent>, width: u16) -> FlowMetrics {
        let mut section_offsets = Vec::with_capacity(deck.total_sections());
        let mut line = 0u16;
        for section in deck.iter() {
            section_offsets.push(line);
            line = line.saturating_add(block_height(&section.content, width));
        }
        FlowMetrics {
            width,
            total_lines: line,
            section_offsets,
        }
    }

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        deck: &Deck<SectionContent>,
        offset: u16,
        theme: &Theme,
    ) {
        let text_width = body_width(area.width);
        let mut lines = Vec::new();

        for section in deck.iter() {
            let bg = Style::default().bg(theme.section_bg(section.index));
            lines.push(Line::from(Span::styled(
                format!(" {}", section.content.title),
                theme.title_style(),
            )).style(bg));
            lines.push(Line::default().style(bg));
            lines.extend(wrap_text(&section.content.body, text_width).into_iter().map(|l| {
                Line::from(Span::styled(format!(" {}", l), theme.body_style())).style(bg)
            }));
            lines.push(Line::default().style(bg));
        }

        let paragraph = Paragraph::new(lines)
            .style(Style::default().bg(theme.bg0))
            .scroll((offset, 0));
        frame.render_widget(paragraph, area);
    }
}

fn body_width(width: u16) -> usize {
    (width as usize).saturating_sub(2).max(1)
}

/// Title, blank, body, trailing blank
fn block_height(content: &SectionContent, width: u16) -> u16 {
    let body = wrap_text(&content.body, body_width(width)).len();
    (body + 3).min(u16::MAX as usize) as u16
}
