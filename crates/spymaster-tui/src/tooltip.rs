//! News tooltip shown while hovering a marked bucket.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};
use spymaster_core::NewsEvent;

pub const TOOLTIP_WIDTH: u16 = 40;
/// Gap between the pointer and the tooltip edge.
pub const TOOLTIP_OFFSET: u16 = 2;
const MAX_HEADLINE_LINES: u16 = 4;

/// Rectangle for a tooltip anchored at the pointer.
///
/// Opens to the right of the pointer and flips to the left when it would
/// cross the container's right edge. The result is clamped to `container`.
pub fn placement(container: Rect, column: u16, row: u16, height: u16) -> Rect {
    let width = TOOLTIP_WIDTH.min(container.width);
    let right_edge = container.right();

    let mut left = column.saturating_add(TOOLTIP_OFFSET);
    if left.saturating_add(width) > right_edge {
        left = column.saturating_sub(width + TOOLTIP_OFFSET);
    }
    let left = left.clamp(container.x, right_edge.saturating_sub(width).max(container.x));

    let height = height.min(container.height);
    let top = row.clamp(
        container.y,
        container.bottom().saturating_sub(height).max(container.y),
    );

    Rect::new(left, top, width, height)
}

pub struct NewsTooltip<'a> {
    news: &'a NewsEvent,
}

impl<'a> NewsTooltip<'a> {
    pub fn new(news: &'a NewsEvent) -> Self {
        Self { news }
    }

    /// Rows needed at [`TOOLTIP_WIDTH`]: border, source, headline, date.
    pub fn height(&self) -> u16 {
        let inner = usize::from(TOOLTIP_WIDTH - 2);
        let chars = self.news.headline.chars().count().max(1);
        let headline_rows = u16::try_from(chars.div_ceil(inner)).unwrap_or(MAX_HEADLINE_LINES);
        headline_rows.min(MAX_HEADLINE_LINES) + 4
    }
}

impl Widget for NewsTooltip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let lines = vec![
            Line::from(Span::styled(
                self.news.source.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )),
            Line::from(self.news.headline.clone()),
            Line::from(Span::styled(
                self.news.published_on(),
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)))
            .render(area, buf);
    }
}
