//! Popup positioning helpers.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;

/// Rectangle directly beneath `anchor`, clamped to the frame so the popup
/// never draws outside the terminal.
pub fn popup_below_anchor(
    anchor: Rect,
    frame_area: Rect,
    width: u16,
    height: u16,
    x_offset: u16,
) -> Rect {
    let popup_x = anchor
        .x
        .saturating_add(x_offset)
        .min(frame_area.width.saturating_sub(1));
    let popup_y = anchor.y.saturating_add(anchor.height);

    Rect {
        x: popup_x,
        y: popup_y.min(frame_area.height),
        width: width.min(frame_area.width.saturating_sub(popup_x)),
        height: height.min(frame_area.height.saturating_sub(popup_y)),
    }
}

/// Clear the popup area so underlying content doesn't bleed through.
pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}
