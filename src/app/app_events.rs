use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::io;
use std::time::Duration;

use super::app_state::{App, AppOutcome};
use crate::controller::{FieldEvent, InputKey, SurfaceEvent};
use crate::field::Field;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

impl App {
    pub fn handle_events(&mut self) -> io::Result<()> {
        // Drive debounce deadlines and fetch completions every pass
        self.controller.tick(self.now_ms());

        if event::poll(EVENT_POLL_TIMEOUT)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    self.handle_paste_event(&text);
                }
                Event::FocusGained => {
                    self.controller.handle_event(&FieldEvent::Focus, self.now_ms());
                }
                Event::FocusLost => {
                    self.controller.handle_event(&FieldEvent::Blur, self.now_ms());
                }
                Event::Mouse(mouse_event) => {
                    self.handle_mouse_event(mouse_event);
                }
                Event::Resize(..) => {
                    self.request_render();
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.outcome = Some(AppOutcome::Cancelled);
            return;
        }

        let now = self.now_ms();
        match key.code {
            // Keys the widget may consume are never fed to the textarea
            KeyCode::Up | KeyCode::Down | KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => {
                let text_after = self.controller.field().value();
                let dispatch = self.controller.handle_event(
                    &FieldEvent::KeyInput {
                        key: input_key_for(key.code),
                        text_after,
                    },
                    now,
                );
                if !dispatch.suppress_default {
                    match key.code {
                        KeyCode::Enter => self.outcome = Some(AppOutcome::Accepted),
                        KeyCode::Esc => self.outcome = Some(AppOutcome::Cancelled),
                        _ => {}
                    }
                }
            }
            _ => {
                self.controller.field_mut().input(key);
                let text_after = self.controller.field().value();
                self.controller.handle_event(
                    &FieldEvent::KeyInput {
                        key: input_key_for(key.code),
                        text_after,
                    },
                    now,
                );
                self.request_render();
            }
        }
    }

    fn handle_paste_event(&mut self, text: &str) {
        // The field is single-line; a pasted newline would break it
        let sanitized: String = text
            .chars()
            .filter(|ch| *ch != '\n' && *ch != '\r')
            .collect();
        self.controller.field_mut().insert_str(&sanitized);

        let text_after = self.controller.field().value();
        self.controller
            .handle_event(&FieldEvent::Paste { text_after }, self.now_ms());
        self.request_render();
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved => {
                if let Some(row) =
                    self.controller
                        .surface()
                        .row_at(self.frame_area, mouse.column, mouse.row)
                {
                    self.controller.handle_surface_event(SurfaceEvent::Hover(row));
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(row) =
                    self.controller
                        .surface()
                        .row_at(self.frame_area, mouse.column, mouse.row)
                {
                    self.controller.handle_surface_event(SurfaceEvent::Press(row));
                } else if position_in(self.controller.field().bounds(), mouse.column, mouse.row) {
                    self.controller.handle_event(&FieldEvent::Click, self.now_ms());
                }
            }
            _ => {}
        }
    }
}

fn position_in(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

fn input_key_for(code: KeyCode) -> InputKey {
    match code {
        KeyCode::Char(ch) => InputKey::Char(ch),
        KeyCode::Backspace => InputKey::Backspace,
        KeyCode::Delete => InputKey::Delete,
        KeyCode::Enter => InputKey::Enter,
        KeyCode::Tab => InputKey::Tab,
        KeyCode::Esc => InputKey::Escape,
        KeyCode::Up => InputKey::Up,
        KeyCode::Down => InputKey::Down,
        KeyCode::Left => InputKey::Left,
        KeyCode::Right => InputKey::Right,
        KeyCode::Modifier(modifier) => modifier_key_for(modifier),
        _ => InputKey::Other,
    }
}

fn modifier_key_for(modifier: ModifierKeyCode) -> InputKey {
    match modifier {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => InputKey::Shift,
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => InputKey::Control,
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => InputKey::Alt,
        ModifierKeyCode::LeftSuper
        | ModifierKeyCode::RightSuper
        | ModifierKeyCode::LeftMeta
        | ModifierKeyCode::RightMeta => InputKey::Meta,
        _ => InputKey::Other,
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
