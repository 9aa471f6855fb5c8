//! Painting: draws an assembled primitive list to a 2D context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives the primitive list from
//! [`crate::render::scene`] plus camera/viewport state and produces pixels;
//! it does not mutate any application state.
//!
//! All fallible Canvas2D calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the
//! result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Camera;
use crate::consts::PIN_RADIUS_PX;
use crate::render::{Primitive, Style};

/// Shadow blur applied to glowing (selected) primitives, in drawing units.
const GLOW_BLUR: f64 = 8.0;

/// Selection glow color.
const GLOW_COLOR: &str = "#1E90FF";

/// Draw the full scene.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device
/// pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any Canvas2D call fails.
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    primitives: &[Primitive],
    camera: &Camera,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    // Clear in device pixels, then enter drawing space.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;

    for primitive in primitives {
        draw_primitive(ctx, primitive, camera.zoom)?;
    }

    Ok(())
}

fn draw_primitive(ctx: &CanvasRenderingContext2d, primitive: &Primitive, zoom: f64) -> Result<(), JsValue> {
    match primitive {
        Primitive::Path { points, closed, style } => draw_path(ctx, points, *closed, style),
        Primitive::Segments { segments, style } => draw_segments(ctx, segments, style),
        Primitive::Rect { x, y, width, height, filled, style } => {
            draw_rect(ctx, *x, *y, *width, *height, *filled, style);
            Ok(())
        }
        Primitive::Ellipse { cx, cy, rx, ry, filled, style } => {
            draw_ellipse(ctx, *cx, *cy, *rx, *ry, *filled, style)
        }
        Primitive::Scallop { points, style } => draw_scallop(ctx, points, style),
        Primitive::Text { x, y, text, font_size, bold, style } => {
            draw_text(ctx, *x, *y, text, *font_size, *bold, style)
        }
        Primitive::PinMarker { x, y, label, style } => draw_pin(ctx, *x, *y, label, style, zoom),
    }
}

fn draw_path(
    ctx: &CanvasRenderingContext2d,
    points: &[crate::camera::Point],
    closed: bool,
    style: &Style,
) -> Result<(), JsValue> {
    let Some(first) = points.first() else {
        return Ok(());
    };
    ctx.save();
    apply_stroke(ctx, style);
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in &points[1..] {
        ctx.line_to(p.x, p.y);
    }
    if closed {
        ctx.close_path();
    }
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_segments(
    ctx: &CanvasRenderingContext2d,
    segments: &[(crate::camera::Point, crate::camera::Point)],
    style: &Style,
) -> Result<(), JsValue> {
    ctx.save();
    apply_stroke(ctx, style);
    ctx.begin_path();
    for (a, b) in segments {
        ctx.move_to(a.x, a.y);
        ctx.line_to(b.x, b.y);
    }
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, width: f64, height: f64, filled: bool, style: &Style) {
    ctx.save();
    apply_stroke(ctx, style);
    if filled {
        ctx.set_fill_style_str(&style.color);
        ctx.fill_rect(x, y, width, height);
    }
    ctx.stroke_rect(x, y, width, height);
    ctx.restore();
}

fn draw_ellipse(
    ctx: &CanvasRenderingContext2d,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    filled: bool,
    style: &Style,
) -> Result<(), JsValue> {
    if rx <= 0.0 || ry <= 0.0 {
        return Ok(());
    }
    ctx.save();
    apply_stroke(ctx, style);
    ctx.begin_path();
    ctx.ellipse(cx, cy, rx, ry, 0.0, 0.0, 2.0 * PI)?;
    if filled {
        ctx.set_fill_style_str(&style.color);
        ctx.fill();
    }
    ctx.stroke();
    ctx.restore();
    Ok(())
}

/// Revision cloud: one outward-bulging arc per consecutive point pair. The
/// outline is a visual approximation and does not self-close.
fn draw_scallop(
    ctx: &CanvasRenderingContext2d,
    points: &[crate::camera::Point],
    style: &Style,
) -> Result<(), JsValue> {
    if points.len() < 2 {
        return Ok(());
    }
    ctx.save();
    apply_stroke(ctx, style);
    ctx.begin_path();
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let mid_x = (a.x + b.x) / 2.0;
        let mid_y = (a.y + b.y) / 2.0;
        let radius = (b.x - a.x).hypot(b.y - a.y) / 2.0;
        if radius == 0.0 {
            continue;
        }
        let start = (a.y - mid_y).atan2(a.x - mid_x);
        let end = (b.y - mid_y).atan2(b.x - mid_x);
        ctx.move_to(a.x, a.y);
        ctx.arc(mid_x, mid_y, radius, start, end)?;
    }
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_text(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    text: &str,
    font_size: f64,
    bold: bool,
    style: &Style,
) -> Result<(), JsValue> {
    ctx.save();
    if style.glow {
        apply_glow(ctx);
    }
    ctx.set_fill_style_str(&style.color);
    let weight = if bold { "bold " } else { "" };
    ctx.set_font(&format!("{weight}{font_size}px sans-serif"));
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    ctx.fill_text(text, x, y)?;
    ctx.restore();
    Ok(())
}

/// Pins keep a constant apparent size: radius is screen pixels over zoom.
fn draw_pin(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    label: &str,
    style: &Style,
    zoom: f64,
) -> Result<(), JsValue> {
    let radius = PIN_RADIUS_PX / zoom;
    ctx.save();
    ctx.set_fill_style_str(&style.color);
    ctx.set_stroke_style_str("#fff");
    ctx.set_line_width(2.0 / zoom);
    ctx.begin_path();
    ctx.arc(x, y, radius, 0.0, 2.0 * PI)?;
    ctx.fill();
    ctx.stroke();

    if !label.is_empty() {
        ctx.set_fill_style_str("#1F1A17");
        ctx.set_font(&format!("{}px sans-serif", 12.0 / zoom));
        ctx.set_text_align("left");
        ctx.set_text_baseline("middle");
        ctx.fill_text(label, x + radius * 1.4, y)?;
    }

    ctx.restore();
    Ok(())
}

fn apply_stroke(ctx: &CanvasRenderingContext2d, style: &Style) {
    if style.glow {
        apply_glow(ctx);
    }
    ctx.set_stroke_style_str(&style.color);
    ctx.set_line_width(style.stroke_width.max(0.5));
}

fn apply_glow(ctx: &CanvasRenderingContext2d) {
    ctx.set_shadow_blur(GLOW_BLUR);
    ctx.set_shadow_color(GLOW_COLOR);
}
