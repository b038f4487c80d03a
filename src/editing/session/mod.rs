// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit session: one engine instance for one view.
//!
//! A session owns the committed objects, the undo history, the selection,
//! the active tool and the viewport. Every operation runs synchronously and
//! records its notifications in an outbox that the owner drains with
//! [`EditSession::drain_events`].

mod measurements;
mod replication;
mod selection_click;

pub use measurements::{MeasurementError, MeasurementKind};
pub use replication::DrawingState;

use super::events::SessionEvent;
use super::mouse::{CursorShape, MouseButton, MouseEvent};
use super::selection::{Selection, SelectionTarget};
use super::undo::{DrawingAction, UndoHistory};
use super::viewport::ViewPort;
use crate::model::{ObjectKind, ObjectStore, StoredObject};
use crate::settings::EngineSettings;
use crate::tools::{ClickOutcome, Construction, PreviewShape, ToolBox, ToolId};
use kurbo::{Point, Size, Vec2};

#[derive(Debug, Clone)]
pub struct EditSession {
    /// Name reported in events, e.g. "front"
    view_name: String,

    store: ObjectStore,
    history: UndoHistory,
    selection: Selection,

    /// Active tool with its in-progress buffer
    tool: ToolBox,

    viewport: ViewPort,
    settings: EngineSettings,

    /// Last cursor position inside the image, in image space
    cursor: Option<Point>,

    /// Whether idle clicks select objects
    selection_enabled: bool,

    events: Vec<SessionEvent>,
}

impl EditSession {
    pub fn new(view_name: impl Into<String>, settings: EngineSettings) -> Self {
        Self {
            view_name: view_name.into(),
            store: ObjectStore::new(),
            history: UndoHistory::with_limit(settings.max_history),
            selection: Selection::new(),
            tool: ToolBox::Idle,
            viewport: ViewPort::default(),
            settings,
            cursor: None,
            selection_enabled: true,
            events: Vec::new(),
        }
    }

    // ===== Accessors =====

    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> &ViewPort {
        &self.viewport
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn tool_id(&self) -> ToolId {
        self.tool.id()
    }

    pub fn is_drawing(&self) -> bool {
        !self.tool.is_idle()
    }

    pub fn is_selection_enabled(&self) -> bool {
        self.selection_enabled
    }

    /// Points the active tool has buffered so far
    pub fn pending_points(&self) -> &[Point] {
        self.tool.pending()
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Tentative shapes of the in-progress construction
    pub fn preview(&self, cursor: Point) -> Vec<PreviewShape> {
        self.tool.preview(cursor)
    }

    pub fn cursor_shape(&self) -> CursorShape {
        if self.is_drawing() {
            CursorShape::Crosshair
        } else {
            CursorShape::Arrow
        }
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== Transform =====

    /// Accept a new pan/zoom/frame-size from the display layer
    pub fn set_transform(&mut self, offset: Vec2, scale: f64, image_size: Size) {
        self.viewport.set_transform(offset, scale, image_size);
    }

    // ===== Tool state machine =====

    /// Arm `tool`, discarding any selection and in-progress construction
    pub fn start_drawing(&mut self, tool: ToolId) {
        if tool == ToolId::Idle {
            self.stop_drawing();
            return;
        }
        tracing::debug!("[{}] start drawing {:?}", self.view_name, tool);
        self.tool = ToolBox::for_id(tool);
        self.selection_enabled = false;
        self.clear_selection();
    }

    /// Abandon the in-progress construction and return to selecting
    pub fn stop_drawing(&mut self) {
        if self.is_drawing() {
            tracing::debug!("[{}] stop drawing {:?}", self.view_name, self.tool.id());
        }
        self.tool.cancel();
        self.tool = ToolBox::Idle;
        self.selection_enabled = true;
        self.clear_selection();
    }

    /// Enable or disable selection clicks; enabling ends any drawing
    pub fn enable_selection(&mut self, enabled: bool) {
        if enabled {
            self.stop_drawing();
        } else {
            self.selection_enabled = false;
        }
    }

    // ===== Mouse input =====

    pub fn mouse_press(&mut self, event: MouseEvent) {
        match event.button {
            MouseButton::Left => self.click(event.pos, event.mods.ctrl),
            MouseButton::Right => self.right_click(),
            MouseButton::Middle => {}
        }
    }

    /// Left click at a screen position
    pub fn click(&mut self, screen: Point, ctrl: bool) {
        let image = self.viewport.to_image(screen);
        if !self.viewport.contains_image_point(image) {
            tracing::debug!(
                "[{}] click at ({:.1}, {:.1}) outside the image",
                self.view_name,
                image.x,
                image.y
            );
            return;
        }

        if self.is_drawing() {
            self.tool_click(image);
        } else if self.selection_enabled {
            self.handle_selection_click(image, ctrl);
        }
    }

    /// Track the cursor for previews; positions off the image clear it
    pub fn mouse_moved(&mut self, screen: Point) {
        let image = self.viewport.to_image(screen);
        self.cursor = self.viewport.contains_image_point(image).then_some(image);
    }

    /// A right click with nothing selected ends the active drawing
    pub fn right_click(&mut self) {
        if self.is_drawing() && self.selection.is_empty() {
            self.stop_drawing();
        }
    }

    fn tool_click(&mut self, image: Point) {
        match self.tool.click(image) {
            ClickOutcome::Pending => {
                tracing::debug!(
                    "[{}] {:?} buffered point {}",
                    self.view_name,
                    self.tool.id(),
                    self.tool.pending().len()
                );
            }
            ClickOutcome::Completed(construction) => {
                self.commit_construction(construction);
            }
            ClickOutcome::Rejected(err) => {
                tracing::debug!(
                    "[{}] {:?} construction discarded: {err}",
                    self.view_name,
                    self.tool.id()
                );
            }
            ClickOutcome::Ignored => {}
        }
    }

    // ===== Commit =====

    fn commit_construction(&mut self, construction: Construction) {
        match construction {
            Construction::Point(obj) => self.commit(obj),
            Construction::Line(obj) => self.commit(obj),
            Construction::LineSegment(obj) => self.commit(obj),
            Construction::Circle(obj) => self.commit(obj),
            Construction::FineCircle(obj) => self.commit(obj),
            Construction::Parallel(obj) => self.commit(obj),
            Construction::TwoLines(obj) => self.commit(obj),
        };
    }

    /// Store an object, record it for undo and announce it
    fn commit<T: StoredObject>(&mut self, object: T) -> crate::model::ObjectId {
        let summary = object.summary();
        self.commit_with(object, summary)
    }

    /// Like [`commit`](Self::commit), reporting `summary` instead of the
    /// object's own
    fn commit_with<T: StoredObject>(
        &mut self,
        object: T,
        summary: Option<String>,
    ) -> crate::model::ObjectId {
        let id = self.store.add(object);
        self.history.push(DrawingAction { kind: T::KIND, id });
        tracing::info!("[{}] committed {} {id}", self.view_name, T::KIND);

        if let Some(text) = summary {
            self.emit(SessionEvent::MeasurementCompleted {
                view: self.view_name.clone(),
                text,
            });
        }
        self.emit(SessionEvent::DrawingCompleted {
            view: self.view_name.clone(),
        });
        id
    }

    // ===== Undo / delete / clear =====

    /// Reverse the most recent construction. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(action) = self.history.pop() else {
            tracing::debug!("[{}] nothing to undo", self.view_name);
            return false;
        };
        if !self.store.remove(action.kind, action.id) {
            tracing::warn!(
                "[{}] undo entry {} {} had no object",
                self.view_name,
                action.kind,
                action.id
            );
        }
        tracing::info!("[{}] undid {} {}", self.view_name, action.kind, action.id);
        self.clear_selection();
        self.emit_data_changed();
        true
    }

    /// Remove every selected object.
    ///
    /// Midlines and bisectors are dropped from the selection without
    /// touching their parent objects. Undo entries of removed objects are
    /// forgotten.
    pub fn delete_selected_objects(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let doomed: Vec<(ObjectKind, crate::model::ObjectId)> = self
            .selection
            .iter()
            .filter_map(|target| match *target {
                SelectionTarget::Object(kind, id) => Some((kind, id)),
                SelectionTarget::Midline(_) | SelectionTarget::Bisector(_) => None,
            })
            .collect();

        let mut removed = Vec::with_capacity(doomed.len());
        for (kind, id) in doomed {
            if self.store.remove(kind, id) {
                removed.push(id);
            }
        }
        self.history.forget(&removed);
        tracing::info!("[{}] deleted {} object(s)", self.view_name, removed.len());

        self.clear_selection();
        if !removed.is_empty() {
            self.emit_data_changed();
        }
    }

    /// Remove every object, the history and the in-progress construction
    pub fn clear_all_drawings(&mut self) {
        self.tool.cancel();
        self.store.clear();
        self.history.clear();
        self.clear_selection();
        tracing::info!("[{}] cleared all drawings", self.view_name);
        self.emit_data_changed();
    }

    // ===== Selection =====

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.emit_selection_changed();
        }
    }

    /// Summary of selected counts per kind, e.g. "Points: 1, Lines: 2"
    pub fn selection_info(&self) -> String {
        let mut parts: Vec<String> = ObjectKind::ALL
            .iter()
            .filter_map(|kind| {
                let n = self.selection.count_of(*kind);
                (n > 0).then(|| format!("{}: {n}", kind.plural()))
            })
            .collect();
        let midlines = self.selection.midlines().len();
        if midlines > 0 {
            parts.push(format!("Midlines: {midlines}"));
        }
        let bisectors = self.selection.bisectors().len();
        if bisectors > 0 {
            parts.push(format!("Bisectors: {bisectors}"));
        }
        if parts.is_empty() {
            "Nothing selected".to_string()
        } else {
            parts.join(", ")
        }
    }

    // ===== Events =====

    fn emit(&mut self, event: SessionEvent) {
        tracing::trace!("{event}");
        self.events.push(event);
    }

    fn emit_selection_changed(&mut self) {
        let info = self.selection_info();
        self.emit(SessionEvent::SelectionChanged { info });
    }

    fn emit_data_changed(&mut self) {
        self.emit(SessionEvent::DrawingDataChanged {
            view: self.view_name.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::mouse::Modifiers;
    use crate::model::{LineObject, PointObject};

    fn session() -> EditSession {
        let mut s = EditSession::new("front", EngineSettings::default());
        s.set_transform(Vec2::ZERO, 1.0, Size::new(1000.0, 1000.0));
        s
    }

    fn click(s: &mut EditSession, x: f64, y: f64) {
        s.click(Point::new(x, y), false);
    }

    #[test]
    fn point_tool_commits_each_click() {
        let mut s = session();
        s.start_drawing(ToolId::Point);
        click(&mut s, 10.0, 10.0);
        click(&mut s, 20.0, 10.0);
        assert_eq!(s.store().count(ObjectKind::Point), 2);
        assert_eq!(s.history().len(), 2);
        let events = s.drain_events();
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, SessionEvent::MeasurementCompleted { .. }))
        );
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, SessionEvent::DrawingCompleted { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn circle_commit_reports_measurement() {
        let mut s = session();
        s.start_drawing(ToolId::Circle);
        click(&mut s, 100.0, 0.0);
        click(&mut s, 0.0, 100.0);
        s.drain_events();
        click(&mut s, 200.0, 100.0);
        let events = s.drain_events();
        assert_eq!(
            events[0],
            SessionEvent::MeasurementCompleted {
                view: "front".into(),
                text: "Circle: radius 100.0, area 31415.9, circumference 628.3".into(),
            }
        );
        assert_eq!(
            events[1],
            SessionEvent::DrawingCompleted {
                view: "front".into()
            }
        );
    }

    #[test]
    fn collinear_circle_commits_nothing() {
        let mut s = session();
        s.start_drawing(ToolId::Circle);
        click(&mut s, 0.0, 0.0);
        click(&mut s, 10.0, 10.0);
        click(&mut s, 20.0, 20.0);
        assert!(s.store().is_empty());
        assert!(s.history().is_empty());
        assert_eq!(s.pending_points().len(), 2);
    }

    #[test]
    fn clicks_outside_image_are_ignored() {
        let mut s = session();
        s.start_drawing(ToolId::Point);
        click(&mut s, -1.0, 5.0);
        click(&mut s, 1000.0, 5.0);
        assert!(s.store().is_empty());

        let mut empty = EditSession::new("left", EngineSettings::default());
        empty.start_drawing(ToolId::Point);
        empty.click(Point::new(0.0, 0.0), false);
        assert!(empty.store().is_empty());
    }

    #[test]
    fn screen_clicks_map_through_viewport() {
        let mut s = EditSession::new("front", EngineSettings::default());
        s.set_transform(Vec2::new(100.0, 50.0), 2.0, Size::new(640.0, 480.0));
        s.start_drawing(ToolId::Point);
        s.click(Point::new(120.0, 70.0), false);
        let (_, p) = s.store().iter::<PointObject>().next().unwrap();
        assert_eq!(p.position, Point::new(10.0, 10.0));
    }

    #[test]
    fn mouse_presses_route_by_button() {
        let mut s = session();
        s.start_drawing(ToolId::Line);
        s.mouse_press(MouseEvent::left(Point::new(10.0, 10.0)));
        assert_eq!(s.pending_points(), &[Point::new(10.0, 10.0)]);

        let middle = MouseEvent::new(Point::new(20.0, 20.0), MouseButton::Middle, Modifiers::NONE);
        s.mouse_press(middle);
        assert_eq!(s.pending_points().len(), 1);
        assert!(s.is_drawing());

        s.mouse_press(MouseEvent::right(Point::new(20.0, 20.0)));
        assert!(!s.is_drawing());
        assert!(s.pending_points().is_empty());
    }

    #[test]
    fn ctrl_press_toggles_selection() {
        let mut s = session();
        s.start_drawing(ToolId::Point);
        click(&mut s, 100.0, 100.0);
        click(&mut s, 400.0, 100.0);
        s.stop_drawing();

        s.mouse_press(MouseEvent::left(Point::new(100.0, 100.0)));
        s.mouse_press(MouseEvent::left(Point::new(400.0, 100.0)).with_ctrl());
        assert_eq!(s.selection().len(), 2);
        s.mouse_press(MouseEvent::left(Point::new(100.0, 100.0)).with_ctrl());
        assert_eq!(s.selection().len(), 1);
        assert_eq!(s.selection_info(), "Points: 1");
    }

    #[test]
    fn cursor_follows_drawing_state() {
        let mut s = session();
        assert_eq!(s.cursor_shape(), CursorShape::Arrow);
        s.start_drawing(ToolId::Circle);
        assert_eq!(s.cursor_shape(), CursorShape::Crosshair);
        s.stop_drawing();
        assert_eq!(s.cursor_shape(), CursorShape::Arrow);
        s.start_drawing(ToolId::Idle);
        assert_eq!(s.cursor_shape(), CursorShape::Arrow);
    }

    #[test]
    fn right_click_stops_drawing() {
        let mut s = session();
        s.start_drawing(ToolId::Line);
        click(&mut s, 1.0, 1.0);
        s.right_click();
        assert!(!s.is_drawing());
        assert!(s.pending_points().is_empty());
        assert!(s.is_selection_enabled());
    }

    #[test]
    fn undo_on_empty_history_is_noop() {
        let mut s = session();
        assert!(!s.undo());
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn undo_reverses_latest_commit() {
        let mut s = session();
        s.start_drawing(ToolId::Line);
        click(&mut s, 0.0, 0.0);
        click(&mut s, 10.0, 0.0);
        assert_eq!(s.store().count(ObjectKind::Line), 1);
        assert!(s.undo());
        assert!(s.store().is_empty());
        assert!(
            s.drain_events()
                .contains(&SessionEvent::DrawingDataChanged {
                    view: "front".into()
                })
        );
    }

    #[test]
    fn delete_then_undo_reverses_remaining_object() {
        let mut s = session();
        s.start_drawing(ToolId::Point);
        click(&mut s, 100.0, 100.0);
        click(&mut s, 500.0, 500.0);
        s.stop_drawing();

        // select and delete the older point
        click(&mut s, 100.0, 100.0);
        assert_eq!(s.selection().len(), 1);
        s.delete_selected_objects();
        assert_eq!(s.store().count(ObjectKind::Point), 1);
        assert_eq!(s.history().len(), 1);

        assert!(s.undo());
        assert!(s.store().is_empty());
        assert!(!s.undo());
    }

    #[test]
    fn midline_cannot_be_deleted_alone() {
        let mut s = session();
        s.start_drawing(ToolId::Parallel);
        click(&mut s, 0.0, 100.0);
        click(&mut s, 500.0, 100.0);
        click(&mut s, 0.0, 300.0);
        s.stop_drawing();

        click(&mut s, 250.0, 200.0);
        assert_eq!(s.selection().midlines().len(), 1);
        s.delete_selected_objects();
        assert_eq!(s.store().count(ObjectKind::Parallel), 1);
        assert!(s.selection().is_empty());
    }

    #[test]
    fn clear_all_empties_everything() {
        let mut s = session();
        s.start_drawing(ToolId::Line);
        click(&mut s, 0.0, 0.0);
        click(&mut s, 10.0, 0.0);
        click(&mut s, 5.0, 5.0);
        s.clear_all_drawings();
        assert!(s.store().is_empty());
        assert!(s.history().is_empty());
        assert!(s.pending_points().is_empty());
        assert_eq!(s.tool_id(), ToolId::Line);
    }

    #[test]
    fn disabled_selection_ignores_idle_clicks() {
        let mut s = session();
        s.start_drawing(ToolId::Point);
        click(&mut s, 10.0, 10.0);
        s.stop_drawing();
        s.enable_selection(false);
        click(&mut s, 10.0, 10.0);
        assert!(s.selection().is_empty());
        s.enable_selection(true);
        click(&mut s, 10.0, 10.0);
        assert_eq!(s.selection().len(), 1);
    }

    #[test]
    fn selection_info_lists_nonzero_kinds() {
        let mut s = session();
        assert_eq!(s.selection_info(), "Nothing selected");
        s.start_drawing(ToolId::Point);
        click(&mut s, 10.0, 10.0);
        s.start_drawing(ToolId::Line);
        click(&mut s, 0.0, 500.0);
        click(&mut s, 900.0, 500.0);
        s.stop_drawing();
        click(&mut s, 10.0, 10.0);
        s.click(Point::new(400.0, 505.0), true);
        assert_eq!(s.selection_info(), "Points: 1, Lines: 1");
        assert!(s.store().iter::<LineObject>().count() == 1);
    }

    #[test]
    fn mouse_moved_tracks_cursor_inside_image() {
        let mut s = session();
        s.mouse_moved(Point::new(12.0, 34.0));
        assert_eq!(s.cursor(), Some(Point::new(12.0, 34.0)));
        s.mouse_moved(Point::new(-5.0, 34.0));
        assert_eq!(s.cursor(), None);
    }
}
