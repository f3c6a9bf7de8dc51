//! Ratatui popup implementation of the results surface.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};

use crate::selection::Direction;
use crate::widgets::popup;

use super::ResultsSurface;
use super::markup::{RowMarkup, RowTone};

const MAX_POPUP_WIDTH: u16 = 60;
const MIN_POPUP_WIDTH: u16 = 24;
const POPUP_BORDER_HEIGHT: u16 = 2;
const POPUP_PADDING: u16 = 4;

/// Suggestion popup anchored directly beneath the input field.
#[derive(Debug, Default)]
pub struct ListSurface {
    built: bool,
    showing: bool,
    anchor: Rect,
    rows: Vec<RowMarkup>,
    hovered: Option<usize>,
    committed_row: Option<usize>,
    max_visible: Option<usize>,
    scroll_offset: usize,
}

impl ListSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows visible at once given the configured cap.
    fn window(&self) -> usize {
        match self.max_visible {
            Some(limit) => self.rows.len().min(limit.max(1)),
            None => self.rows.len(),
        }
    }

    fn content_width(&self) -> u16 {
        let widest = self
            .rows
            .iter()
            .map(|row| row.title().chars().count())
            .max()
            .unwrap_or(0);
        (widest as u16)
            .saturating_add(POPUP_PADDING)
            .clamp(MIN_POPUP_WIDTH, MAX_POPUP_WIDTH)
    }

    /// Popup rectangle for the current anchor, clamped to the frame.
    fn area(&self, frame_area: Rect) -> Rect {
        let height = (self.window() as u16).saturating_add(POPUP_BORDER_HEIGHT);
        popup::popup_below_anchor(self.anchor, frame_area, self.content_width(), height, 0)
    }

    /// Draw the popup. Call after everything else so the list floats on
    /// top.
    pub fn draw(&self, frame: &mut Frame) {
        if !self.showing || self.rows.is_empty() {
            return;
        }
        let area = self.area(frame.area());
        if area.height <= POPUP_BORDER_HEIGHT || area.width <= 2 {
            return;
        }

        popup::clear_area(frame, area);

        let visible = (area.height - POPUP_BORDER_HEIGHT) as usize;
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible)
            .map(|(index, row)| self.styled_row(index, row))
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Suggestions ")
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        );
        frame.render_widget(list, area);
    }

    fn styled_row(&self, index: usize, row: &RowMarkup) -> ListItem<'static> {
        let hovered = self.hovered == Some(index);
        let committed = self.committed_row == Some(index);

        if hovered {
            let line = Line::from(Span::styled(
                format!("► {}", row.title()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            return ListItem::new(line);
        }

        let marker = if committed { "● " } else { "  " };
        let tone_color = match row.tone() {
            RowTone::Odd => Color::White,
            RowTone::Even => Color::Gray,
        };
        let title_style = if committed {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(tone_color)
        };

        let mut spans = vec![Span::styled(format!("{}{}", marker, row.title()), title_style)];
        if !row.content().is_empty() && row.content() != row.title() {
            spans.push(Span::styled(
                format!("  {}", row.content()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        ListItem::new(Line::from(spans))
    }

    /// Map a terminal cell to the row under it, accounting for borders and
    /// the scroll window.
    pub fn row_at(&self, frame_area: Rect, column: u16, row: u16) -> Option<usize> {
        if !self.showing || self.rows.is_empty() {
            return None;
        }
        let area = self.area(frame_area);
        if area.width <= 2 || area.height <= POPUP_BORDER_HEIGHT {
            return None;
        }

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width - 2,
            height: area.height - POPUP_BORDER_HEIGHT,
        };
        if column < inner.x || column >= inner.x + inner.width {
            return None;
        }
        if row < inner.y || row >= inner.y + inner.height {
            return None;
        }

        let index = self.scroll_offset + (row - inner.y) as usize;
        (index < self.rows.len()).then_some(index)
    }
}

impl ResultsSurface for ListSurface {
    fn build(&mut self) {
        self.built = true;
    }

    fn destroy(&mut self) {
        *self = Self::default();
    }

    fn show(&mut self) {
        if self.built {
            self.showing = true;
        }
    }

    fn hide(&mut self) {
        self.showing = false;
    }

    fn is_showing(&self) -> bool {
        self.showing
    }

    fn position_below(&mut self, anchor: Rect) {
        self.anchor = anchor;
    }

    fn render(&mut self, rows: &[RowMarkup]) {
        self.rows = rows.to_vec();
        self.scroll_offset = 0;
        self.hovered = None;
    }

    fn apply_max_visible(&mut self, limit: Option<usize>) {
        self.max_visible = limit;
    }

    fn set_hovered(&mut self, row: Option<usize>) {
        self.hovered = row;
    }

    fn set_committed_row(&mut self, row: Option<usize>) {
        self.committed_row = row;
    }

    fn scroll_into_view(&mut self, row: usize, direction: Direction) {
        let window = self.window();
        if window == 0 {
            return;
        }
        match direction {
            Direction::Down => {
                if row >= self.scroll_offset + window {
                    self.scroll_offset = row + 1 - window;
                }
            }
            Direction::Up => {
                if row < self.scroll_offset {
                    self.scroll_offset = row;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tui_surface_tests.rs"]
mod tui_surface_tests;
