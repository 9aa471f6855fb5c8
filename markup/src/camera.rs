#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{ZOOM_MAX, ZOOM_MIN};

/// A point in either screen or drawing space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A position expressed as percentages of the drawing image's natural size.
///
/// Both components are in `[0, 100]`. This is the wire format for pin
/// positions, decoupling stored geometry from any particular raster
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentPoint {
    pub x: f64,
    pub y: f64,
}

impl PercentPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Natural pixel dimensions of the drawing image, captured on image load.
///
/// Percent conversions are undefined until both dimensions are known and
/// non-zero; the conversion methods return `None` rather than divide by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Convert a drawing-space point to percent coordinates.
    ///
    /// Returns `None` for a degenerate image size.
    #[must_use]
    pub fn drawing_to_percent(&self, p: Point) -> Option<PercentPoint> {
        if self.is_degenerate() {
            return None;
        }
        Some(PercentPoint {
            x: p.x / self.width * 100.0,
            y: p.y / self.height * 100.0,
        })
    }

    /// Convert percent coordinates back to a drawing-space point.
    ///
    /// Exact inverse of [`Self::drawing_to_percent`] for non-degenerate
    /// sizes; returns `None` otherwise.
    #[must_use]
    pub fn percent_to_drawing(&self, p: PercentPoint) -> Option<Point> {
        if self.is_degenerate() {
            return None;
        }
        Some(Point {
            x: p.x / 100.0 * self.width,
            y: p.y / 100.0 * self.height,
        })
    }
}

/// Camera state for pan/zoom over the drawing image.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor clamped to `[ZOOM_MIN, ZOOM_MAX]`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to drawing coordinates.
    #[must_use]
    pub fn screen_to_drawing(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a drawing-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn drawing_to_screen(&self, drawing: Point) -> Point {
        Point {
            x: drawing.x * self.zoom + self.pan_x,
            y: drawing.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to drawing-space distance.
    #[must_use]
    pub fn screen_dist_to_drawing(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Apply a multiplicative zoom step anchored at `screen_anchor`, so the
    /// drawing point under the anchor stays put. The resulting zoom is
    /// clamped to `[ZOOM_MIN, ZOOM_MAX]`.
    pub fn zoom_around(&mut self, screen_anchor: Point, factor: f64) {
        let anchor_drawing = self.screen_to_drawing(screen_anchor);
        self.zoom = (self.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        self.pan_x = screen_anchor.x - anchor_drawing.x * self.zoom;
        self.pan_y = screen_anchor.y - anchor_drawing.y * self.zoom;
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Reset to the identity view (no pan, 100% zoom).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
