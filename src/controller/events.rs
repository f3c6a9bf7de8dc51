//! Event handling and the fetch lifecycle.

use crate::field::{Field, Marker};
use crate::selection::Direction;
use crate::source::types::{FetchOutcome, Query, ResultSet};
use crate::surface::ResultsSurface;

use super::intents::{ControllerEvent, Dispatch, FieldEvent, Intent, SurfaceEvent};
use super::state::Controller;

impl<F: Field, S: ResultsSurface> Controller<F, S> {
    /// Feed one field event. Returns what the host should do about the
    /// event's default behavior.
    pub fn handle_event(&mut self, event: &FieldEvent, now_ms: u64) -> Dispatch {
        if !self.attached {
            return Dispatch::none();
        }
        let dispatch = self.translator.translate(event, self.surface.is_showing());
        if let Some(intent) = dispatch.intent.clone() {
            self.apply_intent(intent, now_ms);
        }
        self.drain_events();
        dispatch
    }

    /// Feed one mouse interaction with the rendered list.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        if !self.attached {
            return;
        }
        match event {
            SurfaceEvent::Hover(index) => {
                self.hover_item(index);
            }
            SurfaceEvent::Press(index) => self.press_item(index),
        }
        self.drain_events();
    }

    /// Drive time-based work: fire settled lookups and collect fetch
    /// completions. Call once per host tick.
    pub fn tick(&mut self, now_ms: u64) {
        if !self.attached {
            return;
        }
        if let Some(text) = self.scheduler.take_due(now_ms) {
            self.run_lookup(&text);
        }
        while let Some(outcome) = self.source.poll() {
            self.handle_outcome(outcome);
        }
        self.drain_events();
    }

    fn apply_intent(&mut self, intent: Intent, now_ms: u64) {
        match intent {
            Intent::QueryChanged(text) => self.scheduler.note_input(&text, now_ms),
            Intent::PasteChanged(text) => self.scheduler.note_paste(&text, now_ms),
            Intent::Navigate(direction) => self.navigate(direction),
            Intent::OpenThenNavigate(direction) => {
                self.selection.defer_navigation(direction);
                let text = self.field.value();
                self.run_lookup(&text);
            }
            Intent::OpenList => {
                let text = self.field.value();
                self.run_lookup(&text);
            }
            Intent::Commit => self.commit(),
            Intent::Dismiss => self.dismiss(),
            Intent::Activate => self.activate(),
            Intent::Deactivate => self.deactivate(),
        }
    }

    fn activate(&mut self) {
        self.active = true;
        // Focus left over from the previous activation must not survive
        self.selection.clear_focus();
        self.surface.set_hovered(None);
        self.surface.position_below(self.field.bounds());
        self.dirty = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
        if self.selection.take_blur_guard() {
            // A press on the list blurred the field; keep the caret sane
            // and take the list down only if the press left focus parked
            self.field.caret_to_end();
            if self.selection.focused().is_some() {
                self.close_surface();
            }
        } else {
            self.close_surface();
        }
        self.dirty = true;
    }

    fn navigate(&mut self, direction: Direction) {
        let Some(index) = self.selection.navigate(direction) else {
            return;
        };
        self.surface.set_hovered(Some(index));
        self.surface.scroll_into_view(index, direction);
        if let Some(item) = self.current_items.get(index).cloned() {
            self.notify(ControllerEvent::FocusItem { item });
        }
        self.dirty = true;
    }

    fn hover_item(&mut self, index: usize) -> bool {
        if !self.selection.hover(index) {
            return false;
        }
        self.surface.set_hovered(Some(index));
        if let Some(item) = self.current_items.get(index).cloned() {
            self.notify(ControllerEvent::FocusItem { item });
        }
        self.dirty = true;
        true
    }

    fn press_item(&mut self, index: usize) {
        // The press is about to blur the field; arm the one-shot guard so
        // that blur does not tear the list down mid-click
        self.selection.arm_blur_guard();
        self.hover_item(index);
        if self.active {
            self.commit();
        }
    }

    fn commit(&mut self) {
        let Some(index) = self.selection.focused() else {
            return;
        };
        let Some(item) = self.current_items.get(index).cloned() else {
            return;
        };

        if let Some(previous) = self.selection.take_committed() {
            self.sink.clear();
            self.field.set_marker(Marker::Selected, false);
            self.notify(ControllerEvent::Deselect {
                item: previous.item,
                index: previous.index,
            });
        }

        self.field.set_value(item.display_text());
        self.field.caret_to_end();
        self.translator.sync_observed(item.display_text());
        self.sink.commit(&item);
        self.field.set_marker(Marker::Selected, true);
        self.selection.set_committed(index, item.clone());

        // The committed text supersedes whatever lookup was brewing
        self.scheduler.cancel_pending();
        self.scheduler.invalidate();
        self.source.cancel();

        self.close_surface();
        self.notify(ControllerEvent::Select { item, index });
        self.dirty = true;
    }

    fn dismiss(&mut self) {
        self.close_surface();
        self.dirty = true;
    }

    fn close_surface(&mut self) {
        self.surface.hide();
        self.surface.set_hovered(None);
        self.selection.close();
    }

    /// Run the lookup for `text` right now: probe the cache, else start a
    /// fetch. Reached from the tick (debounced path) and from the open
    /// gestures (immediate path).
    fn run_lookup(&mut self, text: &str) {
        // An immediate lookup obsoletes whatever the debouncer was holding
        self.scheduler.cancel_pending();
        if !self.scheduler.gate_passes(text) {
            log::debug!("Query {text:?} below minimum length, closing list");
            self.scheduler.invalidate();
            self.source.cancel();
            self.pending_query = None;
            self.field.set_marker(Marker::Loading, false);
            self.close_surface();
            self.dirty = true;
            return;
        }

        let query = Query::new(text, self.source.signature());

        let cached = self.cache.borrow().get(&query).cloned();
        if let Some(results) = cached {
            log::debug!("Cache hit for {text:?}");
            // The cached render wins over any fetch still in flight
            self.scheduler.invalidate();
            self.source.cancel();
            self.pending_query = None;
            self.field.set_marker(Marker::Loading, false);
            self.apply_result_set(&results);
            return;
        }

        self.source.cancel();
        let token = self.scheduler.begin_flight();
        log::debug!("Fetching {text:?} as request {}", token.0);
        self.pending_query = Some(query.clone());
        self.field.set_marker(Marker::Loading, true);
        self.field.set_marker(Marker::Empty, false);
        self.source.begin_fetch(&query, token);
    }

    fn handle_outcome(&mut self, outcome: FetchOutcome) {
        let token = outcome.token();
        if !self.scheduler.is_live(token) {
            log::debug!("Ignoring stale completion for request {}", token.0);
            return;
        }
        self.scheduler.invalidate();
        self.field.set_marker(Marker::Loading, false);

        let Some(query) = self.pending_query.take() else {
            return;
        };

        match outcome {
            FetchOutcome::Success { items, .. } => {
                let rows = self.options.formatter.build_rows(query.text(), &items);
                let results = ResultSet::new(items, rows);
                self.cache.borrow_mut().insert(query, results.clone());
                self.apply_result_set(&results);
            }
            FetchOutcome::Failure { error, .. } => {
                // A failed lookup renders as "no matches"; the field
                // itself stays fully usable
                log::debug!("Fetch failed, listing nothing: {error}");
                self.apply_result_set(&ResultSet::empty());
            }
            FetchOutcome::Cancelled { .. } => {}
        }
    }

    fn apply_result_set(&mut self, results: &ResultSet) {
        self.current_items = results.items().to_vec();
        let count = self.current_items.len();
        self.selection.apply_results(count);

        if count > 0 && self.active {
            self.surface.render(results.rows());
            self.surface.apply_max_visible(self.options.max_visible_items);
            self.surface.set_hovered(None);
            self.surface
                .set_committed_row(self.selection.committed_row_within(count));
            self.surface.position_below(self.field.bounds());
            self.surface.show();
            self.field.set_marker(Marker::Empty, false);
            if let Some(direction) = self.selection.take_deferred_navigation() {
                self.navigate(direction);
            }
        } else {
            self.close_surface();
            if count == 0 {
                self.field.set_marker(Marker::Empty, true);
                self.notify(ControllerEvent::NoItemToList);
            }
        }
        self.dirty = true;
    }

    pub(crate) fn run_seed(&mut self, text: &str) {
        log::debug!("Resolving pre-filled value {text:?}");
        self.field.set_marker(Marker::Loading, true);
        let outcome = self.source.seed(text);
        self.field.set_marker(Marker::Loading, false);

        match outcome {
            Ok(items) if !items.is_empty() => {
                let item = items[0].clone();
                self.field.set_value(item.display_text());
                self.field.caret_to_end();
                self.translator.sync_observed(item.display_text());
                self.sink.commit(&item);
                self.field.set_marker(Marker::Selected, true);
                self.selection.set_committed(0, item.clone());
                self.notify(ControllerEvent::Select { item, index: 0 });
            }
            Ok(_) => {
                log::debug!("Pre-filled value matched nothing, clearing field");
                self.clear_unresolved();
            }
            Err(error) => {
                log::debug!("Seed lookup failed, clearing field: {error}");
                self.clear_unresolved();
            }
        }
    }

    /// An unverified display value is worse than an empty field.
    fn clear_unresolved(&mut self) {
        self.field.set_value("");
        self.translator.sync_observed("");
        self.sink.clear();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
