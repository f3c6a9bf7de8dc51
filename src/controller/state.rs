//! Controller construction and lifecycle.

use crate::cache::CacheHandle;
use crate::commit::CommitSink;
use crate::field::{Field, Marker};
use crate::lookup::LookupScheduler;
use crate::selection::{Committed, SelectionState};
use crate::source::DataSource;
use crate::source::types::{Query, ResultItem};
use crate::surface::ResultsSurface;

use super::intents::ControllerEvent;
use super::options::WidgetOptions;
use super::translator::IntentTranslator;

/// The interaction hub of one widget.
///
/// Owns the field and surface collaborators, the scheduler, the selection
/// state, and the data source, and keeps them consistent as keystrokes,
/// mouse events, and fetch completions interleave.
pub struct Controller<F: Field, S: ResultsSurface> {
    pub(crate) field: F,
    pub(crate) surface: S,
    pub(crate) source: Box<dyn DataSource>,
    pub(crate) sink: Box<dyn CommitSink>,
    pub(crate) cache: CacheHandle,
    pub(crate) options: WidgetOptions,
    pub(crate) translator: IntentTranslator,
    pub(crate) scheduler: LookupScheduler,
    pub(crate) selection: SelectionState,
    /// Items backing the currently rendered list.
    pub(crate) current_items: Vec<ResultItem>,
    /// Query of the fetch in flight, held until its completion lands.
    pub(crate) pending_query: Option<Query>,
    pub(crate) active: bool,
    pub(crate) attached: bool,
    pub(crate) saved_native_hint: bool,
    pub(crate) observers: Vec<Box<dyn FnMut(&ControllerEvent)>>,
    pub(crate) pending_events: Vec<ControllerEvent>,
    pub(crate) dirty: bool,
}

impl<F: Field, S: ResultsSurface> Controller<F, S> {
    pub fn new(
        field: F,
        surface: S,
        source: Box<dyn DataSource>,
        sink: Box<dyn CommitSink>,
        cache: CacheHandle,
        options: WidgetOptions,
    ) -> Self {
        let translator = IntentTranslator::new(options.select_on_tab);
        let scheduler = LookupScheduler::new(options.request_delay_ms, options.min_chars);
        Self {
            field,
            surface,
            source,
            sink,
            cache,
            options,
            translator,
            scheduler,
            selection: SelectionState::new(),
            current_items: Vec::new(),
            pending_query: None,
            active: false,
            attached: false,
            saved_native_hint: true,
            observers: Vec::new(),
            pending_events: Vec::new(),
            dirty: false,
        }
    }

    /// Take over the field: disable its native hinting, build the surface,
    /// and resolve any pre-filled text through the seed lookup.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;
        self.saved_native_hint = self.field.native_hint_enabled();
        self.field.set_native_hint(false);
        self.surface.build();

        let initial = self.field.value();
        self.translator.sync_observed(&initial);
        if !initial.is_empty() {
            self.run_seed(&initial);
        }
        self.dirty = true;
        self.drain_events();
    }

    /// Undo attach: cancel outstanding work, destroy the surface, and
    /// restore the field exactly as it was found.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.scheduler.cancel_pending();
        self.scheduler.invalidate();
        self.source.cancel();
        self.pending_query = None;
        self.surface.destroy();
        self.selection.reset();
        self.current_items.clear();
        self.field.set_marker(Marker::Loading, false);
        self.field.set_marker(Marker::Selected, false);
        self.field.set_marker(Marker::Empty, false);
        self.field.set_native_hint(self.saved_native_hint);
        self.active = false;
        self.attached = false;
        self.dirty = true;
    }

    /// Register an observer for selection lifecycle notifications.
    pub fn on_event(&mut self, observer: impl FnMut(&ControllerEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn sink(&self) -> &dyn CommitSink {
        self.sink.as_ref()
    }

    pub fn committed(&self) -> Option<&Committed> {
        self.selection.committed()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether anything visible changed since the last render.
    pub fn should_render(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn notify(&mut self, event: ControllerEvent) {
        self.pending_events.push(event);
    }

    /// Deliver queued notifications in order. Runs at the end of each
    /// entry point so observers always see a settled controller.
    pub(crate) fn drain_events(&mut self) {
        if self.pending_events.is_empty() || self.observers.is_empty() {
            self.pending_events.clear();
            return;
        }
        let events = std::mem::take(&mut self.pending_events);
        // Take the observer list while firing so a callback registering
        // another observer cannot alias the one being called
        let mut observers = std::mem::take(&mut self.observers);
        for event in &events {
            for observer in observers.iter_mut() {
                observer(event);
            }
        }
        let added = std::mem::replace(&mut self.observers, observers);
        self.observers.extend(added);
    }
}
