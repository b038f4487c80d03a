// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Render contract handed to the display layer.
//!
//! A [`RenderSnapshot`] lists everything the display needs to draw one
//! view: every committed object reduced to drawable primitives in image
//! space, plus the in-progress construction. Lines are already clipped to
//! the image rectangle; lines that miss it are left out. The engine itself
//! never draws pixels.

use crate::editing::{EditSession, SelectionTarget};
use crate::geometry;
use crate::model::{
    CircleObject, FineCircleObject, LineObject, LineSegmentObject, ObjectId, ObjectKind,
    ParallelObject, PointObject, Stroke, StoredObject, TwoLinesObject,
};
use crate::theme;
use crate::tools::{PreviewShape, ToolId};
use kurbo::{Point, Size};
use peniko::Color;
use serde::{Serialize, Serializer};

/// A drawable shape in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// Filled point marker; `radius` is in image units at the current scale
    Marker { center: Point, radius: f64 },
    Segment { start: Point, end: Point },
    Circle { center: Point, radius: f64 },
    /// Small cross at an intersection or circle centre
    Cross { center: Point },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub label: String,
    pub selected: bool,
    #[serde(serialize_with = "serialize_color")]
    pub color: Color,
    pub thickness: f64,
    pub dashed: bool,
    pub primitives: Vec<Primitive>,
    /// Midline or bisector, drawn in the auxiliary colour
    pub auxiliary: Option<AuxiliaryLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AuxiliaryLine {
    pub start: Point,
    pub end: Point,
    pub selected: bool,
    #[serde(serialize_with = "serialize_color")]
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InProgress {
    pub tool: ToolId,
    pub points: Vec<Point>,
    pub cursor: Option<Point>,
    #[serde(serialize_with = "serialize_color")]
    pub color: Color,
    pub primitives: Vec<Primitive>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub view: String,
    pub image_size: Size,
    pub items: Vec<RenderItem>,
    pub in_progress: Option<InProgress>,
}

impl RenderSnapshot {
    pub fn capture(session: &EditSession) -> Self {
        let image_size = session.viewport().image_size;
        let marker_radius = session
            .viewport()
            .screen_to_image_distance(session.settings().point_marker_radius_px);
        let builder = Builder {
            session,
            image_size,
            marker_radius,
        };

        let mut items = Vec::new();
        builder.collect::<PointObject>(&mut items, |p| {
            (p.visible).then(|| {
                vec![Primitive::Marker {
                    center: p.position,
                    radius: marker_radius,
                }]
            })
        });
        builder.collect::<LineObject>(&mut items, |l| {
            Some(builder.clipped(l.start(), l.end()).into_iter().collect())
        });
        builder.collect::<LineSegmentObject>(&mut items, |s| {
            Some(vec![Primitive::Segment {
                start: s.points[0],
                end: s.points[1],
            }])
        });
        builder.collect::<CircleObject>(&mut items, |c| {
            Some(vec![
                Primitive::Circle {
                    center: c.center,
                    radius: c.radius,
                },
                Primitive::Cross { center: c.center },
            ])
        });
        builder.collect::<FineCircleObject>(&mut items, |c| {
            Some(vec![
                Primitive::Circle {
                    center: c.center,
                    radius: c.radius,
                },
                Primitive::Cross { center: c.center },
            ])
        });
        builder.collect::<ParallelObject>(&mut items, |p| {
            let [a, b] = p.first_line();
            let [c, d] = p.second_line;
            Some(
                [builder.clipped(a, b), builder.clipped(c, d)]
                    .into_iter()
                    .flatten()
                    .collect(),
            )
        });
        builder.collect::<TwoLinesObject>(&mut items, |t| {
            let [a, b] = t.first_line();
            let [c, d] = t.second_line();
            let cross = Primitive::Cross {
                center: t.intersection,
            };
            Some(
                [builder.clipped(a, b), builder.clipped(c, d), Some(cross)]
                    .into_iter()
                    .flatten()
                    .collect(),
            )
        });
        builder.attach_auxiliary_lines(&mut items);

        RenderSnapshot {
            view: session.view_name().to_string(),
            image_size,
            items,
            in_progress: builder.in_progress(),
        }
    }
}

struct Builder<'a> {
    session: &'a EditSession,
    image_size: Size,
    marker_radius: f64,
}

impl Builder<'_> {
    /// The infinite line through `a` and `b` inside the image, if it
    /// crosses it
    fn clipped(&self, a: Point, b: Point) -> Option<Primitive> {
        geometry::clip_to_image_bounds(a, b, self.image_size)
            .map(|(start, end)| Primitive::Segment { start, end })
    }

    fn collect<T: StoredObject + Styled>(
        &self,
        items: &mut Vec<RenderItem>,
        primitives: impl Fn(&T) -> Option<Vec<Primitive>>,
    ) {
        let selection = self.session.selection();
        for (id, object) in self.session.store().iter::<T>() {
            let Some(primitives) = primitives(object) else {
                continue;
            };
            let stroke = object.stroke();
            let selected = selection.contains(&SelectionTarget::Object(T::KIND, id));
            items.push(RenderItem {
                id,
                kind: T::KIND,
                label: object.label().to_string(),
                selected,
                color: if selected {
                    theme::interaction::SELECTED
                } else {
                    theme::stroke::color(stroke.color)
                },
                thickness: stroke.thickness,
                dashed: stroke.dashed,
                primitives,
                auxiliary: None,
            });
        }
    }

    fn attach_auxiliary_lines(&self, items: &mut [RenderItem]) {
        let store = self.session.store();
        let selection = self.session.selection();
        for item in items.iter_mut() {
            let line = match item.kind {
                ObjectKind::Parallel => store
                    .get::<ParallelObject>(item.id)
                    .map(|p| (p.midline(), SelectionTarget::Midline(item.id))),
                ObjectKind::TwoLines => store
                    .get::<TwoLinesObject>(item.id)
                    .and_then(|t| t.bisector())
                    .map(|b| (b, SelectionTarget::Bisector(item.id))),
                _ => None,
            };
            let Some(((a, b), target)) = line else {
                continue;
            };
            let Some((start, end)) = geometry::clip_to_image_bounds(a, b, self.image_size) else {
                continue;
            };
            let selected = selection.contains(&target);
            item.auxiliary = Some(AuxiliaryLine {
                start,
                end,
                selected,
                color: if selected {
                    theme::interaction::SELECTED
                } else {
                    theme::interaction::AUXILIARY
                },
            });
        }
    }

    fn in_progress(&self) -> Option<InProgress> {
        let session = self.session;
        if !session.is_drawing() {
            return None;
        }
        let points = session.pending_points().to_vec();
        let mut primitives: Vec<Primitive> = points
            .iter()
            .map(|p| Primitive::Marker {
                center: *p,
                radius: self.marker_radius,
            })
            .collect();
        if let Some(cursor) = session.cursor() {
            primitives.extend(session.preview(cursor).into_iter().filter_map(|shape| match shape {
                PreviewShape::Line { start, end } => self.clipped(start, end),
                PreviewShape::Segment { start, end } => Some(Primitive::Segment { start, end }),
                PreviewShape::Circle { center, radius } => Some(Primitive::Circle { center, radius }),
            }));
        }
        Some(InProgress {
            tool: session.tool_id(),
            points,
            cursor: session.cursor(),
            color: theme::interaction::PREVIEW,
            primitives,
        })
    }
}

/// Objects that carry a stroke style
trait Styled {
    fn stroke(&self) -> Stroke;
}

impl Styled for PointObject {
    fn stroke(&self) -> Stroke {
        Stroke::default()
    }
}

macro_rules! styled {
    ($($ty:ty),*) => {
        $(impl Styled for $ty {
            fn stroke(&self) -> Stroke {
                self.stroke
            }
        })*
    };
}

styled!(
    LineObject,
    LineSegmentObject,
    CircleObject,
    FineCircleObject,
    ParallelObject,
    TwoLinesObject
);

fn serialize_color<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&theme::to_hex(*color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EngineSettings;
    use kurbo::Vec2;

    fn session() -> EditSession {
        let mut s = EditSession::new("front", EngineSettings::default());
        s.set_transform(Vec2::ZERO, 1.0, Size::new(200.0, 100.0));
        s
    }

    #[test]
    fn lines_are_clipped_to_the_image() {
        let mut s = session();
        s.start_drawing(ToolId::Line);
        s.click(Point::new(50.0, 50.0), false);
        s.click(Point::new(60.0, 50.0), false);
        let snap = RenderSnapshot::capture(&s);
        assert_eq!(snap.items.len(), 1);
        assert_eq!(
            snap.items[0].primitives,
            vec![Primitive::Segment {
                start: Point::new(0.0, 50.0),
                end: Point::new(200.0, 50.0)
            }]
        );
    }

    #[test]
    fn selection_is_highlighted() {
        let mut s = session();
        s.start_drawing(ToolId::Point);
        s.click(Point::new(20.0, 20.0), false);
        s.stop_drawing();
        s.click(Point::new(20.0, 20.0), false);
        let snap = RenderSnapshot::capture(&s);
        assert!(snap.items[0].selected);
        assert_eq!(snap.items[0].color, theme::interaction::SELECTED);
    }

    #[test]
    fn in_progress_includes_preview() {
        let mut s = session();
        s.start_drawing(ToolId::Circle);
        s.click(Point::new(50.0, 50.0), false);
        s.click(Point::new(70.0, 50.0), false);
        s.mouse_moved(Point::new(60.0, 60.0));
        let progress = RenderSnapshot::capture(&s).in_progress.unwrap();
        assert_eq!(progress.tool, ToolId::Circle);
        assert_eq!(progress.points.len(), 2);
        assert!(
            progress
                .primitives
                .iter()
                .any(|p| matches!(p, Primitive::Circle { .. }))
        );
    }

    #[test]
    fn parallel_carries_midline() {
        let mut s = session();
        s.start_drawing(ToolId::Parallel);
        for p in [(10.0, 20.0), (100.0, 20.0), (10.0, 60.0)] {
            s.click(Point::new(p.0, p.1), false);
        }
        let snap = RenderSnapshot::capture(&s);
        let aux = snap.items[0].auxiliary.unwrap();
        assert_eq!(aux.start, Point::new(0.0, 40.0));
        assert_eq!(aux.end, Point::new(200.0, 40.0));
        assert!(!aux.selected);
        assert_eq!(aux.color, theme::interaction::AUXILIARY);
    }

    #[test]
    fn bisector_outside_the_image_is_dropped() {
        let mut s = EditSession::new("front", EngineSettings::default());
        s.set_transform(Vec2::ZERO, 1.0, Size::new(100.0, 100.0));
        s.start_drawing(ToolId::TwoLines);
        for p in [(0.0, 10.0), (99.0, 10.99), (99.0, 19.01), (0.0, 20.0)] {
            s.click(Point::new(p.0, p.1), false);
        }
        let snap = RenderSnapshot::capture(&s);
        assert_eq!(snap.items.len(), 1);
        let item = &snap.items[0];
        assert_eq!(item.kind, ObjectKind::TwoLines);
        assert_eq!(item.auxiliary, None);
        let segments = item
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Segment { .. }))
            .count();
        assert_eq!(segments, 2);
    }

    #[test]
    fn in_progress_uses_preview_colour() {
        let mut s = session();
        s.start_drawing(ToolId::Line);
        s.click(Point::new(50.0, 50.0), false);
        let progress = RenderSnapshot::capture(&s).in_progress.unwrap();
        assert_eq!(progress.color, theme::interaction::PREVIEW);
        let json = serde_json::to_value(RenderSnapshot::capture(&s)).unwrap();
        assert_eq!(json["in_progress"]["color"], "#00bfffff");
    }

    #[test]
    fn snapshot_serializes() {
        let mut s = session();
        s.start_drawing(ToolId::Point);
        s.click(Point::new(20.0, 20.0), false);
        let json = serde_json::to_value(RenderSnapshot::capture(&s)).unwrap();
        assert_eq!(json["items"][0]["color"], "#00ff00ff");
        assert_eq!(json["items"][0]["primitives"][0]["type"], "marker");
    }
}
