pub mod markup;
pub mod tui_surface;

// Re-export public types
pub use markup::{RowFormatter, RowMarkup, RowTone};
pub use tui_surface::ListSurface;

use ratatui::layout::Rect;

use crate::selection::Direction;

/// The floating list the controller renders suggestions into.
///
/// Implementations own geometry and styling; the controller only drives
/// lifecycle, visibility, content, and scroll intent through this trait.
pub trait ResultsSurface {
    /// Allocate whatever the surface needs before its first show.
    fn build(&mut self);

    /// Tear down everything `build` created.
    fn destroy(&mut self);

    fn show(&mut self);

    fn hide(&mut self);

    fn is_showing(&self) -> bool;

    /// Re-anchor the surface beneath the field.
    fn position_below(&mut self, anchor: Rect);

    /// Replace the rendered rows. Resets the scroll window.
    fn render(&mut self, rows: &[RowMarkup]);

    /// Cap the number of rows visible at once; None means unlimited.
    fn apply_max_visible(&mut self, limit: Option<usize>);

    fn set_hovered(&mut self, row: Option<usize>);

    fn set_committed_row(&mut self, row: Option<usize>);

    /// Bring `row` into the visible window if the movement clipped it.
    fn scroll_into_view(&mut self, row: usize, direction: Direction);
}
