use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use super::app_state::App;
use crate::field::{Field, Marker};

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        self.frame_area = frame.area();

        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

        self.render_input(frame, layout[0]);
        self.render_status(frame, layout[2]);

        // The suggestion list draws last so it floats over the layout
        self.controller.surface().draw(frame);
    }

    fn render_input(&mut self, frame: &mut Frame, area: Rect) {
        let field = self.controller.field_mut();
        field.set_area(area);

        let (color, title) = if field.marker(Marker::Loading) {
            (Color::Yellow, " Search (fetching...) ")
        } else if field.marker(Marker::Selected) {
            (Color::Green, " Search ")
        } else if field.marker(Marker::Empty) {
            (Color::Red, " Search (no matches) ")
        } else {
            (Color::Cyan, " Search ")
        };

        field.textarea_mut().set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );
        frame.render_widget(field.textarea(), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(warning) => Line::styled(warning.clone(), Style::default().fg(Color::Yellow)),
            None => Line::styled(
                "Type to search | Up/Down navigate | Enter select | Esc cancel",
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}
