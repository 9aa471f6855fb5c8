//! Input model: tools, modifier keys, mouse buttons, and the gesture state
//! machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `GestureState` is the active gesture being tracked between
//! pointer-down and pointer-up; each variant carries the context needed to
//! render a live preview and to emit the final payload on release. `UiState`
//! holds the persistent per-viewer settings the renderer and the engine both
//! read: active tool, additive selection set, armed pin mode, pin filter,
//! and the style applied to new markups.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashSet;

use uuid::Uuid;

use crate::camera::Point;
use crate::consts::DEFAULT_STROKE_WIDTH;
use crate::doc::{DEFAULT_LAYER, LinkKind, PathPoint, PinFilter, PinKind, StampKind};

/// Which markup tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default). Dragging empty space pans.
    #[default]
    Select,
    /// Freehand ink.
    Pen,
    /// Straight line segment.
    Line,
    /// Directed arrow.
    Arrow,
    /// Axis-aligned rectangle.
    Rectangle,
    /// Ellipse inscribed in the drag box.
    Circle,
    /// Revision cloud outline.
    Cloud,
    /// Free text via the inline editor.
    Text,
    /// Boxed note via the inline editor.
    Callout,
    /// Single-click fixed-label stamp.
    Stamp,
    /// Two-point pixel measurement.
    Dimension,
    /// Single-click fixed-size link marker.
    Hyperlink,
}

impl Tool {
    /// Tools that draw by dragging a single anchor + live point pair.
    #[must_use]
    pub fn is_drag_shape(self) -> bool {
        matches!(self, Self::Line | Self::Arrow | Self::Rectangle | Self::Circle | Self::Dimension)
    }

    /// Tools that accumulate a freehand point trail.
    #[must_use]
    pub fn is_path(self) -> bool {
        matches!(self, Self::Pen | Self::Cloud)
    }

    /// Tools that open the inline text editor on pointer-down.
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::Callout)
    }

    /// Tools that create a markup directly on pointer-down, with no drag.
    #[must_use]
    pub fn is_click_create(self) -> bool {
        matches!(self, Self::Stamp | Self::Hyperlink)
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click). Always pans.
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key, by the name the browser reports (e.g. `"Delete"`,
/// `"Escape"`, `"+"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent viewer state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Currently active markup tool.
    pub tool: Tool,
    /// Additive multi-select set of markup ids. Exists only while the Select
    /// tool is active; cleared on tool change, deletion, and Escape.
    pub selection: HashSet<Uuid>,
    /// Armed pin-drop mode. Takes priority over the active tool for the next
    /// pointer-down, then disarms.
    pub armed_pin: Option<PinKind>,
    /// Which pins currently render.
    pub pin_filter: PinFilter,
    /// Stamp label applied by the next stamp click.
    pub stamp_kind: StampKind,
    /// Link target kind applied by the next hyperlink click.
    pub link_kind: LinkKind,
    /// Record the next hyperlink marker points at, if chosen.
    pub linked_id: Option<Uuid>,
    /// Color applied to new markups.
    pub color: String,
    /// Stroke width applied to new ink and shape markups.
    pub stroke_width: f64,
    /// Layer new markups are assigned to.
    pub active_layer: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            selection: HashSet::new(),
            armed_pin: None,
            pin_filter: PinFilter::All,
            stamp_kind: StampKind::Approved,
            link_kind: LinkKind::Document,
            linked_id: None,
            color: "#D32F2F".to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            active_layer: DEFAULT_LAYER.to_owned(),
        }
    }
}

/// The active gesture being tracked between pointer-down and pointer-up.
///
/// Selecting a new tool while any non-idle variant is active is disallowed;
/// the gesture must complete or be cancelled first.
#[derive(Debug, Clone)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// Dragging the view (middle button, or Select-tool drag on empty space).
    Panning {
        /// Screen-space position of the previous pointer event, used to
        /// compute the pan delta.
        last_screen: Point,
    },
    /// Sizing a drag shape from an anchor corner.
    DraggingShape {
        /// Drawing-space corner where the drag started.
        anchor: Point,
        /// Drawing-space position of the pointer at the latest event.
        live: Point,
    },
    /// Accumulating a freehand trail for pen or cloud.
    DrawingPath {
        /// Drawing-space points gathered so far, in input order.
        points: Vec<PathPoint>,
    },
    /// Inline text capture is open; the host owns the text buffer and calls
    /// back with submit or cancel.
    EditingText {
        /// Drawing-space anchor where the editor was opened.
        anchor: Point,
        /// Whether this edit commits as a text or a callout markup.
        tool: Tool,
    },
}

impl GestureState {
    /// True when no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::Idle
    }
}
