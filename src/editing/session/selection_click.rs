// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Selection clicks for EditSession

use super::EditSession;
use crate::editing::hit_test::{self, Tolerances};
use kurbo::Point;

impl EditSession {
    /// Apply a selection click at an image-space position.
    ///
    /// A plain click replaces the selection with the hit target (or clears
    /// it on a miss); a ctrl click toggles the hit target and leaves the
    /// selection alone on a miss. `SelectionChanged` is emitted only when
    /// the set changed.
    pub fn handle_selection_click(&mut self, image: Point, ctrl: bool) {
        let tolerances = Tolerances::for_scale(&self.settings, self.viewport.scale);
        let hit = hit_test::hit_test(&self.store, image, tolerances);

        tracing::debug!(
            "[{}] selection click at ({:.1}, {:.1}) ctrl={ctrl} hit={hit:?}",
            self.view_name,
            image.x,
            image.y
        );

        let before = self.selection.clone();
        match hit {
            Some(target) if ctrl => self.selection.toggle(target),
            Some(target) => {
                self.selection.clear();
                self.selection.insert(target);
            }
            None if !ctrl => self.selection.clear(),
            None => {}
        }
        if self.selection != before {
            self.emit_selection_changed();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::editing::{EditSession, SessionEvent};
    use crate::editing::selection::SelectionTarget;
    use crate::model::ObjectKind;
    use crate::settings::EngineSettings;
    use crate::tools::ToolId;
    use kurbo::{Point, Size, Vec2};

    fn session_with_points() -> EditSession {
        let mut s = EditSession::new("vertical", EngineSettings::default());
        s.set_transform(Vec2::ZERO, 1.0, Size::new(800.0, 600.0));
        s.start_drawing(ToolId::Point);
        for x in [100.0, 300.0, 500.0] {
            s.click(Point::new(x, 100.0), false);
        }
        s.stop_drawing();
        s
    }

    #[test]
    fn plain_click_replaces_selection() {
        let mut s = session_with_points();
        s.handle_selection_click(Point::new(100.0, 100.0), false);
        s.handle_selection_click(Point::new(300.0, 100.0), false);
        assert_eq!(s.selection().len(), 1);
        let ids = s.selection().ids_of(ObjectKind::Point);
        let second = s.store().iter::<crate::model::PointObject>().nth(1).unwrap().0;
        assert_eq!(ids, vec![second]);
    }

    #[test]
    fn ctrl_click_toggles() {
        let mut s = session_with_points();
        s.handle_selection_click(Point::new(100.0, 100.0), true);
        s.handle_selection_click(Point::new(300.0, 100.0), true);
        assert_eq!(s.selection().len(), 2);
        s.handle_selection_click(Point::new(100.0, 100.0), true);
        assert_eq!(s.selection().len(), 1);
    }

    #[test]
    fn miss_clears_unless_ctrl() {
        let mut s = session_with_points();
        s.handle_selection_click(Point::new(100.0, 100.0), false);
        s.handle_selection_click(Point::new(700.0, 500.0), true);
        assert_eq!(s.selection().len(), 1);
        s.handle_selection_click(Point::new(700.0, 500.0), false);
        assert!(s.selection().is_empty());
    }

    #[test]
    fn unchanged_selection_emits_nothing() {
        let mut s = session_with_points();
        s.drain_events();
        s.handle_selection_click(Point::new(700.0, 500.0), true);
        s.handle_selection_click(Point::new(700.0, 500.0), false);
        assert!(s.drain_events().is_empty());

        s.handle_selection_click(Point::new(100.0, 100.0), false);
        assert_eq!(
            s.drain_events(),
            vec![SessionEvent::SelectionChanged {
                info: "Points: 1".into()
            }]
        );
        s.handle_selection_click(Point::new(100.0, 100.0), false);
        s.handle_selection_click(Point::new(700.0, 500.0), true);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn tolerance_shrinks_when_zoomed_in() {
        let mut s = session_with_points();
        // 34 screen px at scale 4 is 8.5 image px
        s.set_transform(Vec2::ZERO, 4.0, Size::new(800.0, 600.0));
        s.handle_selection_click(Point::new(110.0, 100.0), false);
        assert!(s.selection().is_empty());
        s.handle_selection_click(Point::new(105.0, 100.0), false);
        assert!(matches!(
            s.selection().iter().next(),
            Some(SelectionTarget::Object(ObjectKind::Point, _))
        ));
    }
}
