//! Hit-testing: which saved markup, if any, is under a drawing-space point.
//!
//! Used by the Select tool to toggle ids in the selection set. Tolerances are
//! specified in screen pixels and divided by the camera zoom so strokes stay
//! clickable at any magnification. Unknown payloads never hit.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::HIT_SLOP_PX;
use crate::doc::{DocStore, MarkupData, MarkupId, PathPoint};

/// Test which visible markup (if any) is under `drawing_pt`.
///
/// Later records win when several overlap, matching draw order (later on
/// top). Markups hidden by their layer are never hit.
#[must_use]
pub fn hit_test(drawing_pt: Point, doc: &DocStore, camera: &Camera) -> Option<MarkupId> {
    let tol = camera.screen_dist_to_drawing(HIT_SLOP_PX);
    doc.visible_markups()
        .into_iter()
        .rev()
        .find(|markup| payload_hit(&markup.payload(), drawing_pt, tol))
        .map(|markup| markup.id)
}

/// Test a single decoded payload against a drawing-space point.
#[must_use]
pub fn payload_hit(payload: &MarkupData, p: Point, tol: f64) -> bool {
    match payload {
        MarkupData::Pen { points, stroke_width } | MarkupData::Cloud { points, stroke_width } => {
            polyline_hit(points, p, tol + stroke_width / 2.0)
        }
        MarkupData::Line { x1, y1, x2, y2, stroke_width }
        | MarkupData::Arrow { x1, y1, x2, y2, stroke_width } => {
            segment_dist(p, Point::new(*x1, *y1), Point::new(*x2, *y2)) <= tol + stroke_width / 2.0
        }
        MarkupData::Dimension { x1, y1, x2, y2, .. } => {
            segment_dist(p, Point::new(*x1, *y1), Point::new(*x2, *y2)) <= tol
        }
        MarkupData::Rectangle { x, y, width, height, filled, .. } => {
            rect_hit(p, *x, *y, *width, *height, *filled, tol)
        }
        MarkupData::Circle { cx, cy, rx, ry, filled, .. } => {
            ellipse_hit(p, *cx, *cy, *rx, *ry, *filled, tol)
        }
        MarkupData::Text { x, y, text, font_size, .. } => {
            text_box_hit(p, *x, *y, text, *font_size, tol)
        }
        MarkupData::Callout { x, y, text, font_size } => {
            text_box_hit(p, *x, *y, text, *font_size, tol)
        }
        MarkupData::Stamp { x, y, stamp_kind, scale } => {
            // Stamps are centered on their anchor; extent follows the label.
            let half_w = label_width(stamp_kind.label(), 16.0 * scale) / 2.0 + tol;
            let half_h = 16.0 * scale + tol;
            (p.x - x).abs() <= half_w && (p.y - y).abs() <= half_h
        }
        MarkupData::Hyperlink { x, y, width, height, .. } => {
            p.x >= x - tol && p.x <= x + width + tol && p.y >= y - tol && p.y <= y + height + tol
        }
        MarkupData::Unknown => false,
    }
}

// =============================================================
// Shape math
// =============================================================

/// Distance from `p` to the segment from `a` to `b`.
#[must_use]
pub fn segment_dist(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return (p.x - a.x).hypot(p.y - a.y);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    let cx = a.x + t * abx;
    let cy = a.y + t * aby;
    (p.x - cx).hypot(p.y - cy)
}

fn polyline_hit(points: &[PathPoint], p: Point, tol: f64) -> bool {
    if points.len() == 1 {
        let only = points[0];
        return (p.x - only.x).hypot(p.y - only.y) <= tol;
    }
    points.windows(2).any(|pair| {
        segment_dist(p, Point::new(pair[0].x, pair[0].y), Point::new(pair[1].x, pair[1].y)) <= tol
    })
}

fn rect_hit(p: Point, x: f64, y: f64, width: f64, height: f64, filled: bool, tol: f64) -> bool {
    let inside = p.x >= x && p.x <= x + width && p.y >= y && p.y <= y + height;
    if filled {
        return inside || edge_dist_rect(p, x, y, width, height) <= tol;
    }
    edge_dist_rect(p, x, y, width, height) <= tol
}

fn edge_dist_rect(p: Point, x: f64, y: f64, width: f64, height: f64) -> f64 {
    let tl = Point::new(x, y);
    let tr = Point::new(x + width, y);
    let br = Point::new(x + width, y + height);
    let bl = Point::new(x, y + height);
    segment_dist(p, tl, tr)
        .min(segment_dist(p, tr, br))
        .min(segment_dist(p, br, bl))
        .min(segment_dist(p, bl, tl))
}

fn ellipse_hit(p: Point, cx: f64, cy: f64, rx: f64, ry: f64, filled: bool, tol: f64) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return (p.x - cx).hypot(p.y - cy) <= tol;
    }
    let nx = (p.x - cx) / rx;
    let ny = (p.y - cy) / ry;
    let radial = nx.hypot(ny);
    if filled && radial <= 1.0 {
        return true;
    }
    // Ring test: distance from the outline, approximated by scaling the
    // normalized radial error back by the smaller radius.
    (radial - 1.0).abs() * rx.min(ry) <= tol
}

fn text_box_hit(p: Point, x: f64, y: f64, text: &str, font_size: f64, tol: f64) -> bool {
    let width = label_width(text, font_size);
    let height = font_size * 1.4;
    p.x >= x - tol && p.x <= x + width + tol && p.y >= y - tol && p.y <= y + height + tol
}

/// Approximate rendered label width without font metrics. Good enough for
/// click targets; the paint layer measures real glyphs.
fn label_width(text: &str, font_size: f64) -> f64 {
    (text.chars().count() as f64) * font_size * 0.6
}
