//! Scene assembly: maps persisted records and live gesture state to drawable
//! primitives.
//!
//! Everything here is a pure function of data, with no canvas context, no side
//! effects. [`markup_primitives`] is the per-record mapping (exhaustive over
//! [`MarkupData`]; unknown or malformed payloads yield nothing rather than
//! erroring), and [`scene`] assembles the full draw list: layer-visible
//! markups first, the in-progress gesture preview next, pins always last so
//! they stay clickable above markups. Selected markups keep identical
//! geometry and only gain a glow flag.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{ImageSize, Point};
use crate::doc::{DocStore, Markup, MarkupData, Pin};
use crate::geometry;
use crate::input::{GestureState, Tool, UiState};

/// Style shared by every primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// CSS color string.
    pub color: String,
    /// Stroke width in drawing units.
    pub stroke_width: f64,
    /// Selection glow treatment; geometry is unchanged.
    pub glow: bool,
}

/// A drawable primitive in drawing-space coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Open or closed polyline.
    Path { points: Vec<Point>, closed: bool, style: Style },
    /// Independent line segments (arrow shafts and heads, dimension ticks).
    Segments { segments: Vec<(Point, Point)>, style: Style },
    /// Axis-aligned rectangle.
    Rect { x: f64, y: f64, width: f64, height: f64, filled: bool, style: Style },
    /// Ellipse with center and radii.
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64, filled: bool, style: Style },
    /// Chain of outward-bulging arcs between consecutive points (revision
    /// cloud). Not closed.
    Scallop { points: Vec<Point>, style: Style },
    /// Text run anchored at its top-left corner.
    Text { x: f64, y: f64, text: String, font_size: f64, bold: bool, style: Style },
    /// Pin marker. `x`/`y` are drawing-space; the radius is fixed in screen
    /// pixels by the paint layer.
    PinMarker { x: f64, y: f64, label: String, style: Style },
}

/// Map one persisted markup to its primitives.
///
/// Returns an empty list for unknown kinds and payloads that failed to
/// decode. Skipping is the contract; decode failures are never errors here.
#[must_use]
pub fn markup_primitives(markup: &Markup, selected: bool) -> Vec<Primitive> {
    let style = Style {
        color: markup.color.clone(),
        stroke_width: 1.0,
        glow: selected,
    };
    payload_primitives(&markup.payload(), style)
}

/// Map a decoded payload to primitives with the given base style. Also used
/// for the live gesture preview, which has no saved record yet.
#[must_use]
pub fn payload_primitives(payload: &MarkupData, mut style: Style) -> Vec<Primitive> {
    match payload {
        MarkupData::Pen { points, stroke_width } => {
            style.stroke_width = *stroke_width;
            vec![Primitive::Path {
                points: points.iter().map(|p| Point::new(p.x, p.y)).collect(),
                closed: false,
                style,
            }]
        }
        MarkupData::Line { x1, y1, x2, y2, stroke_width } => {
            style.stroke_width = *stroke_width;
            vec![Primitive::Segments {
                segments: vec![(Point::new(*x1, *y1), Point::new(*x2, *y2))],
                style,
            }]
        }
        MarkupData::Arrow { x1, y1, x2, y2, stroke_width } => {
            style.stroke_width = *stroke_width;
            let a = Point::new(*x1, *y1);
            let b = Point::new(*x2, *y2);
            let [head_l, head_r] = geometry::arrow_head(a, b);
            vec![Primitive::Segments {
                segments: vec![(a, b), (b, head_l), (b, head_r)],
                style,
            }]
        }
        MarkupData::Rectangle { x, y, width, height, stroke_width, filled } => {
            style.stroke_width = *stroke_width;
            vec![Primitive::Rect {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
                filled: *filled,
                style,
            }]
        }
        MarkupData::Circle { cx, cy, rx, ry, stroke_width, filled } => {
            style.stroke_width = *stroke_width;
            vec![Primitive::Ellipse {
                cx: *cx,
                cy: *cy,
                rx: *rx,
                ry: *ry,
                filled: *filled,
                style,
            }]
        }
        MarkupData::Cloud { points, stroke_width } => {
            style.stroke_width = *stroke_width;
            vec![Primitive::Scallop {
                points: points.iter().map(|p| Point::new(p.x, p.y)).collect(),
                style,
            }]
        }
        MarkupData::Text { x, y, text, font_size, font_weight } => {
            vec![Primitive::Text {
                x: *x,
                y: *y,
                text: text.clone(),
                font_size: *font_size,
                bold: font_weight == "bold",
                style,
            }]
        }
        MarkupData::Callout { x, y, text, font_size } => {
            // Box sized from the text, then the text inset inside it.
            let pad = font_size * 0.5;
            let width = approx_text_width(text, *font_size) + pad * 2.0;
            let height = font_size * 1.4 + pad * 2.0;
            vec![
                Primitive::Rect {
                    x: *x,
                    y: *y,
                    width,
                    height,
                    filled: false,
                    style: style.clone(),
                },
                Primitive::Text {
                    x: x + pad,
                    y: y + pad,
                    text: text.clone(),
                    font_size: *font_size,
                    bold: false,
                    style,
                },
            ]
        }
        MarkupData::Stamp { x, y, stamp_kind, scale } => {
            let font_size = 16.0 * scale;
            let pad = 6.0 * scale;
            let width = approx_text_width(stamp_kind.label(), font_size) + pad * 2.0;
            let height = font_size + pad * 2.0;
            vec![
                Primitive::Rect {
                    x: x - width / 2.0,
                    y: y - height / 2.0,
                    width,
                    height,
                    filled: false,
                    style: style.clone(),
                },
                Primitive::Text {
                    x: x - width / 2.0 + pad,
                    y: y - font_size / 2.0,
                    text: stamp_kind.label().to_owned(),
                    font_size,
                    bold: true,
                    style,
                },
            ]
        }
        MarkupData::Dimension { x1, y1, x2, y2, distance, .. } => {
            let a = Point::new(*x1, *y1);
            let b = Point::new(*x2, *y2);
            vec![
                Primitive::Segments {
                    segments: dimension_segments(a, b),
                    style: style.clone(),
                },
                Primitive::Text {
                    x: (a.x + b.x) / 2.0,
                    y: (a.y + b.y) / 2.0 - 14.0,
                    text: distance.clone(),
                    font_size: 12.0,
                    bold: false,
                    style,
                },
            ]
        }
        MarkupData::Hyperlink { x, y, width, height, link_kind, .. } => {
            vec![
                Primitive::Rect {
                    x: *x,
                    y: *y,
                    width: *width,
                    height: *height,
                    filled: false,
                    style: style.clone(),
                },
                Primitive::Text {
                    x: x + 3.0,
                    y: y + height / 2.0 - 5.0,
                    text: link_label(*link_kind).to_owned(),
                    font_size: 9.0,
                    bold: false,
                    style,
                },
            ]
        }
        MarkupData::Unknown => Vec::new(),
    }
}

/// Map one pin to its marker primitive. Pins need the image size to resolve
/// percent anchors; without it (image metadata not loaded yet) nothing is
/// produced.
#[must_use]
pub fn pin_primitive(pin: &Pin, image_size: ImageSize) -> Option<Primitive> {
    let pos = image_size.percent_to_drawing(crate::camera::PercentPoint::new(pin.x_percent, pin.y_percent))?;
    Some(Primitive::PinMarker {
        x: pos.x,
        y: pos.y,
        label: pin.label.clone(),
        style: Style { color: pin.color.clone(), stroke_width: 1.0, glow: false },
    })
}

/// Build the live-preview payload for an in-progress gesture, reusing the
/// same builders that produce the persisted payload on release.
#[must_use]
pub fn gesture_preview(gesture: &GestureState, ui: &UiState) -> Option<MarkupData> {
    match gesture {
        GestureState::DraggingShape { anchor, live } => match ui.tool {
            Tool::Line => Some(geometry::line(*anchor, *live, ui.stroke_width)),
            Tool::Arrow => Some(geometry::arrow(*anchor, *live, ui.stroke_width)),
            Tool::Rectangle => Some(geometry::rectangle(*anchor, *live, ui.stroke_width, false)),
            Tool::Circle => Some(geometry::circle(*anchor, *live, ui.stroke_width, false)),
            Tool::Dimension => Some(geometry::dimension(*anchor, *live)),
            _ => None,
        },
        GestureState::DrawingPath { points } => match ui.tool {
            Tool::Pen => Some(geometry::pen(points.clone(), ui.stroke_width)),
            Tool::Cloud => Some(geometry::cloud(points.clone(), ui.stroke_width)),
            _ => None,
        },
        GestureState::Idle | GestureState::Panning { .. } | GestureState::EditingText { .. } => None,
    }
}

/// Assemble the full draw list for the current state.
///
/// Order: saved markups (filtered by layer visibility, stable order), then
/// the live gesture preview, then pins (filtered by the pin filter) last.
#[must_use]
pub fn scene(
    doc: &DocStore,
    ui: &UiState,
    gesture: &GestureState,
    image_size: Option<ImageSize>,
) -> Vec<Primitive> {
    let mut primitives = Vec::new();

    for markup in doc.visible_markups() {
        let selected = ui.selection.contains(&markup.id);
        primitives.extend(markup_primitives(markup, selected));
    }

    if let Some(preview) = gesture_preview(gesture, ui) {
        let style = Style { color: ui.color.clone(), stroke_width: ui.stroke_width, glow: false };
        primitives.extend(payload_primitives(&preview, style));
    }

    if let Some(size) = image_size {
        for pin in doc.filtered_pins(ui.pin_filter) {
            primitives.extend(pin_primitive(pin, size));
        }
    }

    primitives
}

fn dimension_segments(a: Point, b: Point) -> Vec<(Point, Point)> {
    // Main run plus short perpendicular ticks at both ends.
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return vec![(a, b)];
    }
    let tick = 6.0;
    let px = -dy / len * tick;
    let py = dx / len * tick;
    vec![
        (a, b),
        (Point::new(a.x - px, a.y - py), Point::new(a.x + px, a.y + py)),
        (Point::new(b.x - px, b.y - py), Point::new(b.x + px, b.y + py)),
    ]
}

fn link_label(kind: crate::doc::LinkKind) -> &'static str {
    match kind {
        crate::doc::LinkKind::Rfi => "RFI",
        crate::doc::LinkKind::Submittal => "SUB",
        crate::doc::LinkKind::Document => "DOC",
        crate::doc::LinkKind::Detail => "DET",
    }
}

/// Approximate text width used for boxes around labels. The paint layer
/// measures real glyphs; this only shapes the border.
fn approx_text_width(text: &str, font_size: f64) -> f64 {
    (text.chars().count() as f64) * font_size * 0.6
}
