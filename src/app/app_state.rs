use std::time::Instant;

use ratatui::layout::Rect;

use crate::cache::CacheRegistry;
use crate::commit::CommitSink;
use crate::config::Config;
use crate::controller::{Controller, WidgetOptions};
use crate::field::{Field, TextField};
use crate::source::DataSource;
use crate::surface::ListSurface;

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppOutcome {
    Accepted,
    Cancelled,
}

pub struct App {
    pub controller: Controller<TextField, ListSurface>,
    pub outcome: Option<AppOutcome>,
    /// Warning shown on the status line instead of the key hints.
    pub status: Option<String>,
    /// Full frame rectangle of the last render, for mouse hit testing.
    pub frame_area: Rect,
    started: Instant,
    needs_render: bool,
}

impl App {
    pub fn new(
        source: Box<dyn DataSource>,
        sink: Box<dyn CommitSink>,
        config: &Config,
        placeholder: &str,
        initial: &str,
    ) -> Self {
        let mut registry = CacheRegistry::new();
        let cache = registry.handle(config.widget.cache_mode, config.widget.cache_length);
        let options = WidgetOptions {
            min_chars: config.widget.min_chars,
            request_delay_ms: config.widget.request_delay_ms,
            max_visible_items: config.widget.visible_limit(),
            select_on_tab: config.widget.select_on_tab,
            ..WidgetOptions::default()
        };

        let mut field = TextField::new(placeholder);
        if !initial.is_empty() {
            field.insert_str(initial);
        }

        let mut controller = Controller::new(
            field,
            ListSurface::default(),
            source,
            sink,
            cache,
            options,
        );
        controller.on_event(|event| log::debug!("Controller event: {:?}", event));

        Self {
            controller,
            outcome: None,
            status: None,
            frame_area: Rect::default(),
            started: Instant::now(),
            needs_render: true,
        }
    }

    /// Milliseconds since the app started, the clock every controller
    /// call runs on.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn should_quit(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn should_render(&self) -> bool {
        self.needs_render || self.controller.should_render()
    }

    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    pub fn clear_render_flags(&mut self) {
        self.needs_render = false;
        self.controller.clear_dirty();
    }

    /// Text printed to stdout when the session is accepted: the sink's
    /// machine value when one exists, the field text otherwise.
    pub fn accepted_output(&self) -> String {
        self.controller
            .sink()
            .value()
            .unwrap_or_else(|| self.controller.field().value())
    }
}
