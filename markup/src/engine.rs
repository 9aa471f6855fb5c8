//! Top-level engine: owns the store, camera, and gesture state machine, and
//! turns raw pointer/keyboard events into markup and pin mutations.
//!
//! The engine never performs I/O. Completed gestures apply the new record to
//! the local store immediately (optimistic) and return an [`Action`] for the
//! host to persist through the gateway; the host later calls
//! [`EngineCore::confirm_markup`] / [`EngineCore::confirm_pin`] with the
//! canonical record, or [`EngineCore::persistence_failed`] to leave the
//! record flagged unsynced for retry.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, ImageSize, Point};
use crate::consts::{ZOOM_KEY_STEP, ZOOM_WHEEL_STEP};
use crate::doc::{
    DocStore, Markup, MarkupData, MarkupId, PartialPin, Pin, PinFilter, PinId, PinKind, PinStatus,
};
use crate::geometry;
use crate::hit;
use crate::input::{Button, GestureState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::{paint, render};
use uuid::Uuid;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
///
/// Creation actions carry records under provisional ids; the host persists
/// them and confirms or fails the write back into the engine.
#[derive(Debug, Clone)]
pub enum Action {
    /// A markup was applied optimistically; persist it via the gateway.
    MarkupCreated(Markup),
    /// Markups were removed locally; issue the batch delete.
    MarkupsDeleted { ids: Vec<MarkupId> },
    /// A pin was applied optimistically; persist it via the gateway.
    PinCreated(Pin),
    /// A pin field edit was applied locally; persist the sparse update.
    PinUpdated { id: PinId, fields: PartialPin },
    /// A pin was removed locally; issue the delete.
    PinDeleted { id: PinId },
    /// The text/callout tool wants the inline editor opened at this
    /// drawing-space anchor. The host calls `submit_text` or `cancel_text`.
    TextEditRequested { anchor: Point },
    /// The revision scope changed; re-fetch markups for the new scope.
    MarkupsRefetchNeeded { revision_id: Option<Uuid> },
    /// Visible state changed; redraw.
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from [`Engine`] so it can be tested without WASM/browser
/// dependencies.
pub struct EngineCore {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub gesture: GestureState,
    /// Drawing this viewer is open on.
    pub drawing_id: Uuid,
    /// Revision scope for markups. `None` until a revision is selected.
    pub revision_id: Option<Uuid>,
    /// Identity attached to new records, if known.
    pub created_by: Option<Uuid>,
    /// Natural image dimensions, captured on image load. Percent
    /// conversions (pin placement) are deferred until this is known.
    pub image_size: Option<ImageSize>,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    /// Space bar held. While true, a primary-button drag pans instead of
    /// starting the active tool's gesture.
    space_held: bool,
}

impl EngineCore {
    #[must_use]
    pub fn new(drawing_id: Uuid) -> Self {
        Self {
            doc: DocStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            gesture: GestureState::default(),
            drawing_id,
            revision_id: None,
            created_by: None,
            image_size: None,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            space_held: false,
        }
    }

    // --- Data inputs ---

    /// Hydrate markups from a gateway snapshot.
    pub fn load_markups(&mut self, markups: Vec<Markup>) {
        self.doc.load_markups(markups);
    }

    /// Hydrate pins from a gateway snapshot.
    pub fn load_pins(&mut self, pins: Vec<Pin>) {
        self.doc.load_pins(pins);
    }

    /// Hydrate layers from a gateway snapshot.
    pub fn load_layers(&mut self, layers: Vec<crate::doc::Layer>) {
        self.doc.load_layers(layers);
    }

    /// Record the natural image dimensions once metadata is available.
    /// Degenerate sizes are ignored.
    pub fn set_image_size(&mut self, width: f64, height: f64) {
        let size = ImageSize::new(width, height);
        if !size.is_degenerate() {
            self.image_size = Some(size);
        }
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    // --- Persistence callbacks (two-phase optimistic write) ---

    /// Replace a provisional markup with the gateway's canonical record.
    pub fn confirm_markup(&mut self, provisional_id: &MarkupId, canonical: Markup) {
        self.doc.confirm_markup(provisional_id, canonical);
    }

    /// Replace a provisional pin with the gateway's canonical record.
    pub fn confirm_pin(&mut self, provisional_id: &PinId, canonical: Pin) {
        self.doc.confirm_pin(provisional_id, canonical);
    }

    /// The gateway write for this record failed. Optimistic records stay
    /// flagged unsynced until confirmed, so no state changes here; returns
    /// whether the record is still present and retryable.
    #[must_use]
    pub fn persistence_failed(&self, id: &Uuid) -> bool {
        self.doc.is_unsynced(id)
    }

    /// Re-issue the create action for an unsynced markup, if it still exists.
    #[must_use]
    pub fn retry_markup(&self, id: &MarkupId) -> Option<Action> {
        if !self.doc.is_unsynced(id) {
            return None;
        }
        self.doc
            .markup(id)
            .cloned()
            .map(Action::MarkupCreated)
    }

    // --- Tool / mode ---

    /// Set the active tool. Disallowed mid-gesture: the gesture must
    /// complete or be cancelled first. Changing tool clears the selection.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if !self.gesture.is_idle() {
            return Vec::new();
        }
        if self.ui.tool == tool {
            return Vec::new();
        }
        self.ui.tool = tool;
        self.ui.selection.clear();
        vec![Action::RenderNeeded]
    }

    /// Arm pin-drop mode. Takes priority over the active tool for the next
    /// pointer-down, then disarms.
    pub fn arm_pin(&mut self, kind: PinKind) {
        self.ui.armed_pin = Some(kind);
    }

    /// Leave pin-drop mode without placing.
    pub fn disarm_pin(&mut self) {
        self.ui.armed_pin = None;
    }

    /// Narrow which pins render. Persisted data is untouched.
    pub fn set_pin_filter(&mut self, filter: PinFilter) -> Vec<Action> {
        self.ui.pin_filter = filter;
        vec![Action::RenderNeeded]
    }

    /// Toggle a named layer's visibility in the local render set.
    pub fn set_layer_visibility(&mut self, name: &str, visible: bool) -> Vec<Action> {
        if self.doc.set_layer_visibility(name, visible) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Revision scope ---

    /// Switch the viewer to another revision: swaps the markup scope and
    /// clears the loaded markups so none leak across revisions. The host
    /// swaps the displayed file and re-fetches markups for the new id.
    pub fn select_revision(&mut self, revision_id: Option<Uuid>) -> Vec<Action> {
        self.revision_id = revision_id;
        self.doc.load_markups(Vec::new());
        self.ui.selection.clear();
        self.image_size = None;
        vec![Action::MarkupsRefetchNeeded { revision_id }, Action::RenderNeeded]
    }

    // --- Pointer events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if !self.gesture.is_idle() {
            return Vec::new();
        }

        if button == Button::Middle {
            self.gesture = GestureState::Panning { last_screen: screen };
            return Vec::new();
        }
        if button != Button::Primary {
            return Vec::new();
        }

        // Space-held drag pans regardless of the active tool or armed pin.
        if self.space_held {
            self.gesture = GestureState::Panning { last_screen: screen };
            return Vec::new();
        }

        let drawing_pt = self.camera.screen_to_drawing(screen);

        // Armed pin mode wins over the active tool for this pointer-down.
        if let Some(kind) = self.ui.armed_pin {
            return self.place_pin(kind, drawing_pt);
        }

        match self.ui.tool {
            Tool::Select => {
                if let Some(id) = hit::hit_test(drawing_pt, &self.doc, &self.camera) {
                    // Additive multi-select: toggle without clearing others.
                    if !self.ui.selection.remove(&id) {
                        self.ui.selection.insert(id);
                    }
                    vec![Action::RenderNeeded]
                } else {
                    self.gesture = GestureState::Panning { last_screen: screen };
                    Vec::new()
                }
            }
            tool if tool.is_drag_shape() => {
                self.gesture = GestureState::DraggingShape { anchor: drawing_pt, live: drawing_pt };
                vec![Action::RenderNeeded]
            }
            tool if tool.is_path() => {
                self.gesture = GestureState::DrawingPath {
                    points: vec![crate::doc::PathPoint::new(drawing_pt.x, drawing_pt.y)],
                };
                vec![Action::RenderNeeded]
            }
            tool if tool.is_text() => {
                self.gesture = GestureState::EditingText { anchor: drawing_pt, tool };
                vec![Action::TextEditRequested { anchor: drawing_pt }]
            }
            Tool::Stamp => {
                let data = geometry::stamp(drawing_pt, self.ui.stamp_kind, 1.0);
                self.create_markup(data)
            }
            Tool::Hyperlink => {
                let data = geometry::hyperlink(drawing_pt, self.ui.link_kind, self.ui.linked_id);
                self.create_markup(data)
            }
            _ => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        match &mut self.gesture {
            GestureState::Panning { last_screen } => {
                let dx = screen.x - last_screen.x;
                let dy = screen.y - last_screen.y;
                *last_screen = screen;
                self.camera.pan_by(dx, dy);
                vec![Action::RenderNeeded]
            }
            GestureState::DraggingShape { live, .. } => {
                *live = self.camera.screen_to_drawing(screen);
                vec![Action::RenderNeeded]
            }
            GestureState::DrawingPath { points } => {
                let p = self.camera.screen_to_drawing(screen);
                points.push(crate::doc::PathPoint::new(p.x, p.y));
                vec![Action::RenderNeeded]
            }
            GestureState::Idle | GestureState::EditingText { .. } => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        match std::mem::take(&mut self.gesture) {
            GestureState::Panning { .. } => Vec::new(),
            GestureState::DraggingShape { anchor, .. } => {
                let release = self.camera.screen_to_drawing(screen);
                let data = match self.ui.tool {
                    Tool::Line => geometry::line(anchor, release, self.ui.stroke_width),
                    Tool::Arrow => geometry::arrow(anchor, release, self.ui.stroke_width),
                    Tool::Rectangle => geometry::rectangle(anchor, release, self.ui.stroke_width, false),
                    Tool::Circle => geometry::circle(anchor, release, self.ui.stroke_width, false),
                    Tool::Dimension => geometry::dimension(anchor, release),
                    _ => return vec![Action::RenderNeeded],
                };
                self.create_markup(data)
            }
            GestureState::DrawingPath { points } => {
                if points.len() < 2 {
                    return vec![Action::RenderNeeded];
                }
                let data = match self.ui.tool {
                    Tool::Pen => geometry::pen(points, self.ui.stroke_width),
                    Tool::Cloud => geometry::cloud(points, self.ui.stroke_width),
                    _ => return vec![Action::RenderNeeded],
                };
                self.create_markup(data)
            }
            // Text editing survives pointer-up; it ends on submit or Escape.
            other @ GestureState::EditingText { .. } => {
                self.gesture = other;
                Vec::new()
            }
            GestureState::Idle => Vec::new(),
        }
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        let factor = if delta.dy < 0.0 { ZOOM_WHEEL_STEP } else { 1.0 / ZOOM_WHEEL_STEP };
        self.camera.zoom_around(screen, factor);
        vec![Action::RenderNeeded]
    }

    // --- Text editing ---

    /// Commit the inline editor. Empty or whitespace-only text discards the
    /// markup; otherwise a text or callout record is created at the anchor.
    pub fn submit_text(&mut self, text: &str) -> Vec<Action> {
        let GestureState::EditingText { anchor, tool } = &self.gesture else {
            return Vec::new();
        };
        let (anchor, tool) = (*anchor, *tool);
        self.gesture = GestureState::Idle;
        if text.trim().is_empty() {
            return vec![Action::RenderNeeded];
        }
        let data = match tool {
            Tool::Callout => geometry::callout(anchor, text.to_owned(), crate::consts::CALLOUT_FONT_SIZE),
            _ => geometry::text(
                anchor,
                text.to_owned(),
                crate::consts::DEFAULT_FONT_SIZE,
                "normal".to_owned(),
            ),
        };
        self.create_markup(data)
    }

    /// Discard the inline editor without creating anything.
    pub fn cancel_text(&mut self) -> Vec<Action> {
        if matches!(self.gesture, GestureState::EditingText { .. }) {
            self.gesture = GestureState::Idle;
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    // --- Pin edits ---

    /// Apply a field edit to an existing pin and return the sparse update
    /// for the gateway. Each field edit is an independent persistence call.
    pub fn update_pin(&mut self, id: &PinId, fields: PartialPin) -> Vec<Action> {
        if !self.doc.apply_pin_partial(id, &fields) {
            return Vec::new();
        }
        vec![Action::PinUpdated { id: *id, fields }, Action::RenderNeeded]
    }

    /// Remove a pin locally and return the delete for the gateway.
    pub fn delete_pin(&mut self, id: &PinId) -> Vec<Action> {
        if self.doc.remove_pin(id).is_none() {
            return Vec::new();
        }
        vec![Action::PinDeleted { id: *id }, Action::RenderNeeded]
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            " " => {
                self.space_held = true;
                Vec::new()
            }
            "+" | "=" => {
                self.camera.zoom_around(self.viewport_center(), ZOOM_KEY_STEP);
                vec![Action::RenderNeeded]
            }
            "-" => {
                self.camera.zoom_around(self.viewport_center(), 1.0 / ZOOM_KEY_STEP);
                vec![Action::RenderNeeded]
            }
            "0" => {
                self.camera.reset();
                vec![Action::RenderNeeded]
            }
            "Delete" | "Backspace" => self.delete_selection(),
            "Escape" => self.on_escape(),
            _ => Vec::new(),
        }
    }

    pub fn on_key_up(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.0 == " " {
            self.space_held = false;
        }
        Vec::new()
    }

    /// Batch-delete every selected markup, then clear the selection.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        if self.ui.selection.is_empty() {
            return Vec::new();
        }
        let mut ids: Vec<MarkupId> = self.ui.selection.drain().collect();
        ids.sort_unstable();
        for id in &ids {
            self.doc.remove_markup(id);
        }
        vec![Action::MarkupsDeleted { ids }, Action::RenderNeeded]
    }

    /// Escape: cancel the in-progress gesture or text edit; with no gesture
    /// active, disarm pin mode or revert the active tool to Select.
    fn on_escape(&mut self) -> Vec<Action> {
        if !self.gesture.is_idle() {
            self.gesture = GestureState::Idle;
            return vec![Action::RenderNeeded];
        }
        if self.ui.armed_pin.is_some() {
            self.ui.armed_pin = None;
            return vec![Action::RenderNeeded];
        }
        self.ui.tool = Tool::Select;
        self.ui.selection.clear();
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The additive selection set.
    #[must_use]
    pub fn selection(&self) -> Vec<MarkupId> {
        let mut ids: Vec<MarkupId> = self.ui.selection.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Look up a markup by id.
    #[must_use]
    pub fn markup(&self, id: &MarkupId) -> Option<&Markup> {
        self.doc.markup(id)
    }

    /// Look up a pin by id.
    #[must_use]
    pub fn pin(&self, id: &PinId) -> Option<&Pin> {
        self.doc.pin(id)
    }

    // --- Internals ---

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    fn place_pin(&mut self, kind: PinKind, drawing_pt: Point) -> Vec<Action> {
        // Percent conversion needs the image size; stay armed until the
        // image metadata has loaded.
        let Some(size) = self.image_size else {
            return Vec::new();
        };
        let Some(percent) = size.drawing_to_percent(drawing_pt) else {
            return Vec::new();
        };
        self.ui.armed_pin = None;
        let pin = Pin {
            id: Uuid::new_v4(),
            drawing_id: self.drawing_id,
            kind,
            x_percent: percent.x,
            y_percent: percent.y,
            label: String::new(),
            status: PinStatus::Open,
            color: kind.default_color().to_owned(),
            notes: String::new(),
        };
        self.doc.insert_pin(pin.clone());
        vec![Action::PinCreated(pin), Action::RenderNeeded]
    }

    fn create_markup(&mut self, data: MarkupData) -> Vec<Action> {
        let markup = Markup {
            id: Uuid::new_v4(),
            drawing_id: self.drawing_id,
            revision_id: self.revision_id,
            kind: data.kind().to_owned(),
            data: data.encode(),
            color: self.ui.color.clone(),
            layer: self.ui.active_layer.clone(),
            created_by: self.created_by,
        };
        self.doc.insert_markup(markup.clone());
        vec![Action::MarkupCreated(markup), Action::RenderNeeded]
    }
}

/// The full viewer engine. Wraps [`EngineCore`] and owns the browser canvas
/// element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, drawing_id: Uuid) -> Self {
        Self { canvas, core: EngineCore::new(drawing_id) }
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a Canvas2D call
    /// fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let primitives = render::scene(
            &self.core.doc,
            &self.core.ui,
            &self.core.gesture,
            self.core.image_size,
        );
        paint::draw(
            &ctx,
            &primitives,
            &self.core.camera,
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        )
    }
}
