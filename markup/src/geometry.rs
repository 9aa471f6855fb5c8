//! Geometry builders: pure functions from gesture points to markup payloads.
//!
//! Each builder takes the points a completed gesture produced and returns the
//! payload that gets persisted, one per row of the markup kind table. No
//! builder touches engine or camera state, which keeps the normalization and
//! round-trip properties directly unit-testable.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{ARROW_HEAD_ANGLE, ARROW_HEAD_LEN, DIMENSION_UNIT, HYPERLINK_MARKER_SIZE};
use crate::doc::{LinkKind, MarkupData, PathPoint, StampKind};

/// Freehand ink from an accumulated pointer trail.
#[must_use]
pub fn pen(points: Vec<PathPoint>, stroke_width: f64) -> MarkupData {
    MarkupData::Pen { points, stroke_width }
}

/// Straight segment from anchor to release point.
#[must_use]
pub fn line(a: Point, b: Point, stroke_width: f64) -> MarkupData {
    MarkupData::Line { x1: a.x, y1: a.y, x2: b.x, y2: b.y, stroke_width }
}

/// Directed segment from anchor to release point. Only the endpoints are
/// stored; the arrowhead is a render-time derivation (see [`arrow_head`]).
#[must_use]
pub fn arrow(a: Point, b: Point, stroke_width: f64) -> MarkupData {
    MarkupData::Arrow { x1: a.x, y1: a.y, x2: b.x, y2: b.y, stroke_width }
}

/// Axis-aligned rectangle spanning the two drag corners.
///
/// Stored `x`/`y` is always the true top-left corner and `width`/`height`
/// are non-negative, regardless of drag direction.
#[must_use]
pub fn rectangle(a: Point, b: Point, stroke_width: f64, filled: bool) -> MarkupData {
    MarkupData::Rectangle {
        x: a.x.min(b.x),
        y: a.y.min(b.y),
        width: (a.x - b.x).abs(),
        height: (a.y - b.y).abs(),
        stroke_width,
        filled,
    }
}

/// Ellipse inscribed in the drag bounding box. Radii are non-negative
/// regardless of drag direction.
#[must_use]
pub fn circle(a: Point, b: Point, stroke_width: f64, filled: bool) -> MarkupData {
    MarkupData::Circle {
        cx: (a.x + b.x) / 2.0,
        cy: (a.y + b.y) / 2.0,
        rx: (a.x - b.x).abs() / 2.0,
        ry: (a.y - b.y).abs() / 2.0,
        stroke_width,
        filled,
    }
}

/// Revision cloud from an accumulated pointer trail. Rendered as successive
/// arcs between consecutive points; the outline need not self-close.
#[must_use]
pub fn cloud(points: Vec<PathPoint>, stroke_width: f64) -> MarkupData {
    MarkupData::Cloud { points, stroke_width }
}

/// Free text anchored at the click point.
#[must_use]
pub fn text(anchor: Point, text: String, font_size: f64, font_weight: String) -> MarkupData {
    MarkupData::Text { x: anchor.x, y: anchor.y, text, font_size, font_weight }
}

/// Boxed callout note anchored at the click point.
#[must_use]
pub fn callout(anchor: Point, text: String, font_size: f64) -> MarkupData {
    MarkupData::Callout { x: anchor.x, y: anchor.y, text, font_size }
}

/// Stamp centered on the click point.
#[must_use]
pub fn stamp(anchor: Point, stamp_kind: StampKind, scale: f64) -> MarkupData {
    MarkupData::Stamp { x: anchor.x, y: anchor.y, stamp_kind, scale }
}

/// Two-point dimension. The label is computed here, once, and frozen: it is
/// not recomputed at render time even if the underlying image is rescaled.
#[must_use]
pub fn dimension(a: Point, b: Point) -> MarkupData {
    let dist = distance(a, b);
    MarkupData::Dimension {
        x1: a.x,
        y1: a.y,
        x2: b.x,
        y2: b.y,
        distance: format!("{dist:.0} {DIMENSION_UNIT}"),
        unit: DIMENSION_UNIT.to_owned(),
    }
}

/// Fixed-size hyperlink marker anchored at the click point.
#[must_use]
pub fn hyperlink(anchor: Point, link_kind: LinkKind, linked_id: Option<Uuid>) -> MarkupData {
    MarkupData::Hyperlink {
        x: anchor.x,
        y: anchor.y,
        width: HYPERLINK_MARKER_SIZE,
        height: HYPERLINK_MARKER_SIZE,
        link_kind,
        linked_id,
    }
}

/// Euclidean distance between two drawing-space points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Endpoints of the two arrowhead lines for a shaft from `a` to `b`.
///
/// The head lines leave the tip at `±ARROW_HEAD_ANGLE` radians off the shaft
/// direction, `ARROW_HEAD_LEN` drawing units long. Symmetric about the shaft
/// by construction.
#[must_use]
pub fn arrow_head(a: Point, b: Point) -> [Point; 2] {
    let angle = (b.y - a.y).atan2(b.x - a.x);
    let left = angle - ARROW_HEAD_ANGLE;
    let right = angle + ARROW_HEAD_ANGLE;
    [
        Point::new(
            b.x - ARROW_HEAD_LEN * left.cos(),
            b.y - ARROW_HEAD_LEN * left.sin(),
        ),
        Point::new(
            b.x - ARROW_HEAD_LEN * right.cos(),
            b.y - ARROW_HEAD_LEN * right.sin(),
        ),
    ]
}
