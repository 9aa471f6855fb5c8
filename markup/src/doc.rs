//! Document model: markup, pin, and layer records plus the in-memory store.
//!
//! This module defines the records the gateway persists (`Markup`, `Pin`,
//! `Layer`, `Drawing`, `Revision`), the tagged payload type decoded from the
//! open `kind`/`data` pair on the wire (`MarkupData`), a sparse-update type
//! for in-place pin edits (`PartialPin`), and the runtime store that owns all
//! live records (`DocStore`).
//!
//! Data flows into this layer from the network (JSON deserialization) and
//! from the input engine (optimistic inserts). The renderer reads from
//! `DocStore` via `visible_markups` / `filtered_pins` to determine what to
//! draw.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a markup record.
pub type MarkupId = Uuid;

/// Unique identifier for a pin record.
pub type PinId = Uuid;

/// Name of the synthetic always-visible layer for markups with no explicit
/// layer assignment. Never user-deletable.
pub const DEFAULT_LAYER: &str = "Default";

// =============================================================
// Markup payloads
// =============================================================

/// A vertex of a freehand or cloud path, in drawing-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fixed stamp labels offered by the stamp tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StampKind {
    Approved,
    Rejected,
    Revise,
    ForReview,
    Void,
}

impl StampKind {
    /// Display label rendered inside the stamp border.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Revise => "REVISE",
            Self::ForReview => "FOR REVIEW",
            Self::Void => "VOID",
        }
    }
}

/// What a hyperlink marker points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Rfi,
    Submittal,
    Document,
    Detail,
}

/// Typed markup payload, one variant per persisted `kind`.
///
/// The wire format is an open `kind` string plus a JSON `data` bag;
/// [`MarkupData::decode`] turns that pair into this sum type so builders and
/// the renderer can be exhaustive matches. Records whose kind is
/// unrecognized, or whose data does not match the kind's shape, decode to
/// [`MarkupData::Unknown`] and render as nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkupData {
    /// Freehand ink: ordered point list.
    Pen { points: Vec<PathPoint>, stroke_width: f64 },
    /// Straight segment between two endpoints.
    Line { x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64 },
    /// Directed segment; the arrowhead is derived at render time.
    Arrow { x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64 },
    /// Axis-aligned rectangle. `width`/`height` are always non-negative.
    Rectangle { x: f64, y: f64, width: f64, height: f64, stroke_width: f64, filled: bool },
    /// Ellipse with center and non-negative radii.
    Circle { cx: f64, cy: f64, rx: f64, ry: f64, stroke_width: f64, filled: bool },
    /// Revision-cloud outline approximated by arcs between the points.
    Cloud { points: Vec<PathPoint>, stroke_width: f64 },
    /// Free text anchored at its top-left corner.
    Text { x: f64, y: f64, text: String, font_size: f64, font_weight: String },
    /// Boxed note anchored at its top-left corner.
    Callout { x: f64, y: f64, text: String, font_size: f64 },
    /// Fixed-label stamp centered on its anchor.
    Stamp { x: f64, y: f64, stamp_kind: StampKind, scale: f64 },
    /// Two-point measurement with a label frozen at creation time.
    Dimension { x1: f64, y1: f64, x2: f64, y2: f64, distance: String, unit: String },
    /// Fixed-size marker linking to another record.
    Hyperlink { x: f64, y: f64, width: f64, height: f64, link_kind: LinkKind, linked_id: Option<Uuid> },
    /// Forward-compatible no-op for kinds this build does not know.
    Unknown,
}

impl MarkupData {
    /// The wire `kind` string for this payload.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pen { .. } => "pen",
            Self::Line { .. } => "line",
            Self::Arrow { .. } => "arrow",
            Self::Rectangle { .. } => "rectangle",
            Self::Circle { .. } => "circle",
            Self::Cloud { .. } => "cloud",
            Self::Text { .. } => "text",
            Self::Callout { .. } => "callout",
            Self::Stamp { .. } => "stamp",
            Self::Dimension { .. } => "dimension",
            Self::Hyperlink { .. } => "hyperlink",
            Self::Unknown => "unknown",
        }
    }

    /// Decode a wire `kind`/`data` pair. Unrecognized kinds and payloads
    /// that do not match their kind's shape yield [`Self::Unknown`].
    #[must_use]
    pub fn decode(kind: &str, data: &serde_json::Value) -> Self {
        let Some(object) = data.as_object() else {
            return Self::Unknown;
        };
        let mut tagged = object.clone();
        tagged.insert("kind".to_owned(), serde_json::json!(kind));
        serde_json::from_value(serde_json::Value::Object(tagged)).unwrap_or(Self::Unknown)
    }

    /// Encode this payload as the wire `data` bag (without the `kind` tag).
    #[must_use]
    pub fn encode(&self) -> serde_json::Value {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.remove("kind");
                serde_json::Value::Object(map)
            }
            _ => serde_json::json!({}),
        }
    }
}

// =============================================================
// Records
// =============================================================

/// A persisted vector annotation, scoped to a drawing revision.
///
/// Lifecycle: created by a completed tool gesture, mutated only by deletion.
/// Corrections are delete-and-redraw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Markup {
    pub id: MarkupId,
    pub drawing_id: Uuid,
    /// Revision this markup belongs to. Markups do not carry forward across
    /// revisions.
    pub revision_id: Option<Uuid>,
    /// Open wire kind; decode with [`Markup::payload`].
    pub kind: String,
    /// Kind-shaped payload bag in drawing-space coordinates.
    pub data: serde_json::Value,
    /// Stroke/fill color as a CSS color string.
    pub color: String,
    /// Named visibility group; [`DEFAULT_LAYER`] when unassigned.
    pub layer: String,
    pub created_by: Option<Uuid>,
}

impl Markup {
    /// Decode the typed payload for this record.
    #[must_use]
    pub fn payload(&self) -> MarkupData {
        MarkupData::decode(&self.kind, &self.data)
    }
}

/// Category of a status-tracked location pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinKind {
    PunchList,
    Inspection,
    Rfi,
    Submittal,
    Observation,
    Incident,
}

impl PinKind {
    /// Default marker color applied at placement.
    #[must_use]
    pub fn default_color(self) -> &'static str {
        match self {
            Self::PunchList => "#E53935",
            Self::Inspection => "#8E24AA",
            Self::Rfi => "#1E88E5",
            Self::Submittal => "#43A047",
            Self::Observation => "#FB8C00",
            Self::Incident => "#D81B60",
        }
    }

    /// Wire/database string for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PunchList => "punch_list",
            Self::Inspection => "inspection",
            Self::Rfi => "rfi",
            Self::Submittal => "submittal",
            Self::Observation => "observation",
            Self::Incident => "incident",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "punch_list" => Some(Self::PunchList),
            "inspection" => Some(Self::Inspection),
            "rfi" => Some(Self::Rfi),
            "submittal" => Some(Self::Submittal),
            "observation" => Some(Self::Observation),
            "incident" => Some(Self::Incident),
            _ => None,
        }
    }
}

/// Workflow status of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinStatus {
    Open,
    InProgress,
    Closed,
}

impl PinStatus {
    /// Wire/database string for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "in_progress" => Some(Self::InProgress),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// A status-bearing point marker anchored by percent position.
///
/// Unlike markups, pins are mutable in place: status, label, and notes are
/// editable without recreation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    pub id: PinId,
    pub drawing_id: Uuid,
    pub kind: PinKind,
    /// Horizontal position as a percentage of the image width, in `[0, 100]`.
    pub x_percent: f64,
    /// Vertical position as a percentage of the image height, in `[0, 100]`.
    pub y_percent: f64,
    pub label: String,
    pub status: PinStatus,
    pub color: String,
    pub notes: String,
}

/// Sparse update for a pin. Only present fields are applied; each field edit
/// is an independent persistence call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialPin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PinStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Render-set filter for pins. Filtering never touches persisted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinFilter {
    #[default]
    All,
    Kind(PinKind),
}

impl PinFilter {
    #[must_use]
    pub fn matches(self, pin: &Pin) -> bool {
        match self {
            Self::All => true,
            Self::Kind(kind) => pin.kind == kind,
        }
    }
}

/// A named visibility group for markups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub id: Uuid,
    pub drawing_id: Uuid,
    pub name: String,
    pub color: String,
    pub visible: bool,
    pub created_by: Option<Uuid>,
}

/// Lifecycle status of a drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingStatus {
    Current,
    Superseded,
    Void,
}

impl DrawingStatus {
    /// Wire/database string for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Superseded => "superseded",
            Self::Void => "void",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "current" => Some(Self::Current),
            "superseded" => Some(Self::Superseded),
            "void" => Some(Self::Void),
            _ => None,
        }
    }
}

/// A logical construction document tracked across revisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawing {
    pub id: Uuid,
    pub project_id: Uuid,
    pub file_url: String,
    pub discipline: String,
    pub status: DrawingStatus,
    /// Denormalized pointer to the revision with status `current`, if any.
    pub current_revision_id: Option<Uuid>,
}

/// Lifecycle status of a revision. At most one revision per drawing is
/// `current`; creating a new current revision demotes the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionStatus {
    Current,
    Superseded,
}

impl RevisionStatus {
    /// Wire/database string for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Superseded => "superseded",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "current" => Some(Self::Current),
            "superseded" => Some(Self::Superseded),
            _ => None,
        }
    }
}

/// One dated version of a drawing's file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revision {
    pub id: Uuid,
    pub drawing_id: Uuid,
    /// Free-text revision label; not numeric-ordered.
    pub label: String,
    pub file_url: String,
    pub file_name: String,
    pub file_size: i64,
    pub description: String,
    pub status: RevisionStatus,
    pub uploaded_by: Option<Uuid>,
}

// =============================================================
// Store
// =============================================================

/// In-memory store of the records visible in the open viewer.
///
/// Optimistic inserts land here immediately with a provisional id and are
/// tracked in `unsynced` until the gateway's canonical record is confirmed.
/// A record that stays unsynced is still rendered; the host surfaces it as
/// retryable rather than rolling it back.
pub struct DocStore {
    markups: HashMap<MarkupId, Markup>,
    pins: HashMap<PinId, Pin>,
    layers: HashMap<String, Layer>,
    unsynced: HashSet<Uuid>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            markups: HashMap::new(),
            pins: HashMap::new(),
            layers: HashMap::new(),
            unsynced: HashSet::new(),
        }
    }

    // --- Markups ---

    /// Replace all markups with a gateway snapshot, clearing sync flags.
    pub fn load_markups(&mut self, markups: Vec<Markup>) {
        self.markups.clear();
        self.unsynced.retain(|id| self.pins.contains_key(id));
        for markup in markups {
            self.markups.insert(markup.id, markup);
        }
    }

    /// Optimistically insert a markup under its provisional id.
    pub fn insert_markup(&mut self, markup: Markup) {
        self.unsynced.insert(markup.id);
        self.markups.insert(markup.id, markup);
    }

    /// Replace a provisional markup with the gateway's canonical record.
    pub fn confirm_markup(&mut self, provisional_id: &MarkupId, canonical: Markup) {
        self.markups.remove(provisional_id);
        self.unsynced.remove(provisional_id);
        self.unsynced.remove(&canonical.id);
        self.markups.insert(canonical.id, canonical);
    }

    /// Remove a markup by id, returning it if it was present.
    pub fn remove_markup(&mut self, id: &MarkupId) -> Option<Markup> {
        self.unsynced.remove(id);
        self.markups.remove(id)
    }

    #[must_use]
    pub fn markup(&self, id: &MarkupId) -> Option<&Markup> {
        self.markups.get(id)
    }

    /// True if the record was inserted optimistically and never confirmed.
    #[must_use]
    pub fn is_unsynced(&self, id: &Uuid) -> bool {
        self.unsynced.contains(id)
    }

    /// All markups in a stable order (by id).
    #[must_use]
    pub fn sorted_markups(&self) -> Vec<&Markup> {
        let mut markups: Vec<&Markup> = self.markups.values().collect();
        markups.sort_by(|a, b| a.id.cmp(&b.id));
        markups
    }

    /// Markups whose layer is currently visible, in stable order.
    ///
    /// A markup renders when its layer's `visible` flag is true, when it sits
    /// in the always-visible [`DEFAULT_LAYER`], or when its layer name has no
    /// loaded layer record.
    #[must_use]
    pub fn visible_markups(&self) -> Vec<&Markup> {
        self.sorted_markups()
            .into_iter()
            .filter(|markup| self.layer_visible(&markup.layer))
            .collect()
    }

    /// Number of markups currently in the store.
    #[must_use]
    pub fn markup_count(&self) -> usize {
        self.markups.len()
    }

    // --- Pins ---

    /// Replace all pins with a gateway snapshot, clearing sync flags.
    pub fn load_pins(&mut self, pins: Vec<Pin>) {
        self.pins.clear();
        self.unsynced.retain(|id| self.markups.contains_key(id));
        for pin in pins {
            self.pins.insert(pin.id, pin);
        }
    }

    /// Optimistically insert a pin under its provisional id.
    pub fn insert_pin(&mut self, pin: Pin) {
        self.unsynced.insert(pin.id);
        self.pins.insert(pin.id, pin);
    }

    /// Replace a provisional pin with the gateway's canonical record.
    pub fn confirm_pin(&mut self, provisional_id: &PinId, canonical: Pin) {
        self.pins.remove(provisional_id);
        self.unsynced.remove(provisional_id);
        self.unsynced.remove(&canonical.id);
        self.pins.insert(canonical.id, canonical);
    }

    /// Apply a sparse in-place edit. Returns false if the pin doesn't exist.
    pub fn apply_pin_partial(&mut self, id: &PinId, partial: &PartialPin) -> bool {
        let Some(pin) = self.pins.get_mut(id) else {
            return false;
        };
        if let Some(ref label) = partial.label {
            pin.label = label.clone();
        }
        if let Some(status) = partial.status {
            pin.status = status;
        }
        if let Some(ref color) = partial.color {
            pin.color = color.clone();
        }
        if let Some(ref notes) = partial.notes {
            pin.notes = notes.clone();
        }
        true
    }

    /// Remove a pin by id, returning it if it was present.
    pub fn remove_pin(&mut self, id: &PinId) -> Option<Pin> {
        self.unsynced.remove(id);
        self.pins.remove(id)
    }

    #[must_use]
    pub fn pin(&self, id: &PinId) -> Option<&Pin> {
        self.pins.get(id)
    }

    /// Pins passing the filter, in stable order (by id). Pins ignore layer
    /// visibility entirely.
    #[must_use]
    pub fn filtered_pins(&self, filter: PinFilter) -> Vec<&Pin> {
        let mut pins: Vec<&Pin> = self
            .pins
            .values()
            .filter(|pin| filter.matches(pin))
            .collect();
        pins.sort_by(|a, b| a.id.cmp(&b.id));
        pins
    }

    /// Number of pins currently in the store.
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    // --- Layers ---

    /// Replace all layers with a gateway snapshot.
    pub fn load_layers(&mut self, layers: Vec<Layer>) {
        self.layers.clear();
        for layer in layers {
            self.layers.insert(layer.name.clone(), layer);
        }
    }

    /// Toggle a layer's visibility. Returns false for unknown names and for
    /// the default layer, which is always visible.
    pub fn set_layer_visibility(&mut self, name: &str, visible: bool) -> bool {
        if name == DEFAULT_LAYER {
            return false;
        }
        let Some(layer) = self.layers.get_mut(name) else {
            return false;
        };
        layer.visible = visible;
        true
    }

    /// Whether markups on the named layer currently render.
    #[must_use]
    pub fn layer_visible(&self, name: &str) -> bool {
        if name == DEFAULT_LAYER {
            return true;
        }
        self.layers.get(name).map_or(true, |layer| layer.visible)
    }

    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
