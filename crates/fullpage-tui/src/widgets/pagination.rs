use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use fullpage_core::pagination::Marker;

use crate::theme::Theme;

/// Column of diamond markers along the right edge of the stage
pub struct PaginationWidget;

impl PaginationWidget {
    const WIDTH: u16 = 3;
    /// Rows per marker, one of them a gap
    const PITCH: u16 = 2;

    /// Area covered by `total` markers inside `stage`
    pub fn area(stage: Rect, total: usize) -> Rect {
        if total == 0 || stage.width < Self::WIDTH + 1 || stage.height == 0 {
            return Rect::default();
        }
        let height = (total as u16)
            .saturating_mul(Self::PITCH)
            .saturating_sub(1)
            .min(stage.height);
        Rect::new(
            stage.right() - Self::WIDTH - 1,
            stage.y + (stage.height - height) / 2,
            Self::WIDTH,
            height,
        )
    }

    /// Cell rectangle of the marker for a 1-based section
    pub fn marker_rect(stage: Rect, total: usize, section: usize) -> Option<Rect> {
        if section == 0 || section > total {
            return None;
        }
        let area = Self::area(stage, total);
        let y = area.y + (section as u16 - 1) * Self::PITCH;
        if y >= area.bottom() {
            return None;
        }
        Some(Rect::new(area.x, y, Self::WIDTH, 1))
    }

    /// Section whose marker covers the cell at `col`, `row`
    pub fn marker_at(stage: Rect, total: usize, col: u16, row: u16) -> Option<usize> {
        (1..=total).find(|&section| {
            Self::marker_rect(stage, total, section)
                .is_some_and(|rect| rect.contains(Position::new(col, row)))
        })
    }

    pub fn render(frame: &mut Frame, stage: Rect, markers: &[Marker], theme: &Theme) {
        for marker in markers {
            let Some(rect) = Self::marker_rect(stage, markers.len(), marker.index) else {
                continue;
            };
            let span = if marker.is_active() {
                Span::styled(
                    "‹◆›",
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(" ◇ ", Style::default().fg(theme.grey0))
            };
            frame.render_widget(Paragraph::new(Line::from(span)), rect);
        }
    }
}
