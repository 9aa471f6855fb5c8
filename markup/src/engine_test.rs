#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::consts::{ZOOM_MAX, ZOOM_MIN};
use crate::doc::{DEFAULT_LAYER, Layer, LinkKind, PathPoint, StampKind};

fn engine() -> EngineCore {
    let mut core = EngineCore::new(Uuid::new_v4());
    core.set_viewport(800.0, 600.0, 1.0);
    core
}

fn saved_line(engine: &EngineCore, x1: f64, y1: f64, x2: f64, y2: f64) -> Markup {
    Markup {
        id: Uuid::new_v4(),
        drawing_id: engine.drawing_id,
        revision_id: engine.revision_id,
        kind: "line".to_owned(),
        data: json!({"x1": x1, "y1": y1, "x2": x2, "y2": y2, "stroke_width": 2.0}),
        color: "#D32F2F".to_owned(),
        layer: DEFAULT_LAYER.to_owned(),
        created_by: None,
    }
}

fn no_mods() -> Modifiers {
    Modifiers::default()
}

fn created_markup(actions: &[Action]) -> Option<&Markup> {
    actions.iter().find_map(|action| match action {
        Action::MarkupCreated(markup) => Some(markup),
        _ => None,
    })
}

fn created_pin(actions: &[Action]) -> Option<&Pin> {
    actions.iter().find_map(|action| match action {
        Action::PinCreated(pin) => Some(pin),
        _ => None,
    })
}

fn approx_eq(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

// =============================================================
// Tool switching
// =============================================================

#[test]
fn tool_change_clears_selection() {
    let mut core = engine();
    let record = saved_line(&core, 0.0, 0.0, 100.0, 0.0);
    let id = record.id;
    core.load_markups(vec![record]);
    core.on_pointer_down(Point::new(50.0, 0.0), Button::Primary, no_mods());
    assert_eq!(core.selection(), vec![id]);

    core.set_tool(Tool::Pen);
    assert!(core.selection().is_empty());
}

#[test]
fn tool_change_is_rejected_mid_gesture() {
    let mut core = engine();
    core.set_tool(Tool::Rectangle);
    core.on_pointer_down(Point::new(10.0, 10.0), Button::Primary, no_mods());
    assert!(!core.gesture.is_idle());

    let actions = core.set_tool(Tool::Pen);
    assert!(actions.is_empty());
    assert_eq!(core.ui.tool, Tool::Rectangle);

    // After release the switch goes through.
    core.on_pointer_up(Point::new(40.0, 40.0), Button::Primary, no_mods());
    core.set_tool(Tool::Pen);
    assert_eq!(core.ui.tool, Tool::Pen);
}

#[test]
fn reselecting_the_same_tool_is_a_no_op() {
    let mut core = engine();
    assert!(core.set_tool(Tool::Select).is_empty());
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_click_toggles_additively() {
    let mut core = engine();
    let a = saved_line(&core, 0.0, 0.0, 100.0, 0.0);
    let b = saved_line(&core, 0.0, 50.0, 100.0, 50.0);
    let (id_a, id_b) = (a.id, b.id);
    core.load_markups(vec![a, b]);

    core.on_pointer_down(Point::new(50.0, 0.0), Button::Primary, no_mods());
    core.on_pointer_up(Point::new(50.0, 0.0), Button::Primary, no_mods());
    core.on_pointer_down(Point::new(50.0, 50.0), Button::Primary, no_mods());
    core.on_pointer_up(Point::new(50.0, 50.0), Button::Primary, no_mods());
    assert_eq!(core.selection().len(), 2);
    assert!(core.selection().contains(&id_a));
    assert!(core.selection().contains(&id_b));

    // A second click on a selected markup deselects only that one.
    core.on_pointer_down(Point::new(50.0, 0.0), Button::Primary, no_mods());
    assert_eq!(core.selection(), vec![id_b]);
}

#[test]
fn select_drag_on_empty_space_pans() {
    let mut core = engine();
    core.on_pointer_down(Point::new(100.0, 100.0), Button::Primary, no_mods());
    core.on_pointer_move(Point::new(130.0, 120.0), no_mods());
    core.on_pointer_up(Point::new(130.0, 120.0), Button::Primary, no_mods());

    assert_eq!(core.camera.pan_x, 30.0);
    assert_eq!(core.camera.pan_y, 20.0);
    assert!(core.selection().is_empty());
}

#[test]
fn delete_removes_exactly_the_selected_markups() {
    let mut core = engine();
    let a = saved_line(&core, 0.0, 0.0, 100.0, 0.0);
    let b = saved_line(&core, 0.0, 50.0, 100.0, 50.0);
    let c = saved_line(&core, 0.0, 100.0, 100.0, 100.0);
    let (id_a, id_b, id_c) = (a.id, b.id, c.id);
    core.load_markups(vec![a, b, c]);

    core.on_pointer_down(Point::new(50.0, 0.0), Button::Primary, no_mods());
    core.on_pointer_up(Point::new(50.0, 0.0), Button::Primary, no_mods());
    core.on_pointer_down(Point::new(50.0, 50.0), Button::Primary, no_mods());
    core.on_pointer_up(Point::new(50.0, 50.0), Button::Primary, no_mods());

    let actions = core.on_key_down(&Key("Delete".to_owned()), no_mods());
    let Some(Action::MarkupsDeleted { ids }) = actions.first() else {
        panic!("expected a batch delete");
    };
    let mut expected = vec![id_a, id_b];
    expected.sort_unstable();
    assert_eq!(*ids, expected);

    assert!(core.markup(&id_a).is_none());
    assert!(core.markup(&id_b).is_none());
    assert!(core.markup(&id_c).is_some());
    assert!(core.selection().is_empty());
}

#[test]
fn delete_with_empty_selection_does_nothing() {
    let mut core = engine();
    assert!(core.on_key_down(&Key("Backspace".to_owned()), no_mods()).is_empty());
}

// =============================================================
// Drag-shape tools
// =============================================================

#[test]
fn rectangle_drag_creates_normalized_payload() {
    let mut core = engine();
    core.set_tool(Tool::Rectangle);
    core.on_pointer_down(Point::new(50.0, 50.0), Button::Primary, no_mods());
    core.on_pointer_move(Point::new(30.0, 30.0), no_mods());
    let actions = core.on_pointer_up(Point::new(10.0, 10.0), Button::Primary, no_mods());

    let markup = created_markup(&actions).expect("markup created");
    let MarkupData::Rectangle { x, y, width, height, .. } = markup.payload() else {
        panic!("expected a rectangle");
    };
    assert_eq!((x, y, width, height), (10.0, 10.0, 40.0, 40.0));
    assert!(core.gesture.is_idle());
}

#[test]
fn drag_coordinates_pass_through_the_camera() {
    let mut core = engine();
    core.camera.pan_x = 100.0;
    core.camera.zoom = 2.0;
    core.set_tool(Tool::Line);
    core.on_pointer_down(Point::new(100.0, 0.0), Button::Primary, no_mods());
    let actions = core.on_pointer_up(Point::new(300.0, 200.0), Button::Primary, no_mods());

    let markup = created_markup(&actions).expect("markup created");
    let MarkupData::Line { x1, y1, x2, y2, .. } = markup.payload() else {
        panic!("expected a line");
    };
    // Stored geometry is drawing-space, independent of pan/zoom.
    assert_eq!((x1, y1), (0.0, 0.0));
    assert_eq!((x2, y2), (100.0, 100.0));
}

#[test]
fn dimension_freezes_its_label_at_creation() {
    let mut core = engine();
    core.set_tool(Tool::Dimension);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    let actions = core.on_pointer_up(Point::new(30.0, 40.0), Button::Primary, no_mods());

    let markup = created_markup(&actions).expect("markup created");
    let MarkupData::Dimension { distance, .. } = markup.payload() else {
        panic!("expected a dimension");
    };
    assert_eq!(distance, "50 px");
}

// =============================================================
// Path tools
// =============================================================

#[test]
fn pen_drag_accumulates_the_trail() {
    let mut core = engine();
    core.set_tool(Tool::Pen);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    core.on_pointer_move(Point::new(5.0, 5.0), no_mods());
    core.on_pointer_move(Point::new(10.0, 0.0), no_mods());
    let actions = core.on_pointer_up(Point::new(10.0, 0.0), Button::Primary, no_mods());

    let markup = created_markup(&actions).expect("markup created");
    let MarkupData::Pen { points, .. } = markup.payload() else {
        panic!("expected pen");
    };
    assert_eq!(points, vec![PathPoint::new(0.0, 0.0), PathPoint::new(5.0, 5.0), PathPoint::new(10.0, 0.0)]);
}

#[test]
fn single_point_path_is_discarded() {
    let mut core = engine();
    core.set_tool(Tool::Pen);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    let actions = core.on_pointer_up(Point::new(0.0, 0.0), Button::Primary, no_mods());
    assert!(created_markup(&actions).is_none());
    assert_eq!(core.doc.markup_count(), 0);
}

// =============================================================
// Click-create tools
// =============================================================

#[test]
fn stamp_click_creates_immediately() {
    let mut core = engine();
    core.set_tool(Tool::Stamp);
    core.ui.stamp_kind = StampKind::Rejected;
    let actions = core.on_pointer_down(Point::new(40.0, 60.0), Button::Primary, no_mods());

    let markup = created_markup(&actions).expect("markup created");
    let MarkupData::Stamp { x, y, stamp_kind, .. } = markup.payload() else {
        panic!("expected stamp");
    };
    assert_eq!((x, y), (40.0, 60.0));
    assert_eq!(stamp_kind, StampKind::Rejected);
    assert!(core.gesture.is_idle());
}

#[test]
fn hyperlink_click_carries_the_chosen_target() {
    let mut core = engine();
    let target = Uuid::new_v4();
    core.set_tool(Tool::Hyperlink);
    core.ui.link_kind = LinkKind::Rfi;
    core.ui.linked_id = Some(target);
    let actions = core.on_pointer_down(Point::new(10.0, 10.0), Button::Primary, no_mods());

    let markup = created_markup(&actions).expect("markup created");
    let MarkupData::Hyperlink { link_kind, linked_id, .. } = markup.payload() else {
        panic!("expected hyperlink");
    };
    assert_eq!(link_kind, LinkKind::Rfi);
    assert_eq!(linked_id, Some(target));
}

// =============================================================
// Text tools
// =============================================================

#[test]
fn text_click_requests_the_inline_editor() {
    let mut core = engine();
    core.set_tool(Tool::Text);
    let actions = core.on_pointer_down(Point::new(25.0, 35.0), Button::Primary, no_mods());
    assert!(matches!(actions.as_slice(), [Action::TextEditRequested { anchor }] if *anchor == Point::new(25.0, 35.0)));

    // The edit survives pointer-up.
    core.on_pointer_up(Point::new(25.0, 35.0), Button::Primary, no_mods());
    assert!(!core.gesture.is_idle());

    let actions = core.submit_text("inspect this weld");
    let markup = created_markup(&actions).expect("markup created");
    let MarkupData::Text { x, y, text, .. } = markup.payload() else {
        panic!("expected text");
    };
    assert_eq!((x, y), (25.0, 35.0));
    assert_eq!(text, "inspect this weld");
    assert!(core.gesture.is_idle());
}

#[test]
fn callout_submit_creates_a_callout() {
    let mut core = engine();
    core.set_tool(Tool::Callout);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    let actions = core.submit_text("see detail 5/A3.1");
    let markup = created_markup(&actions).expect("markup created");
    assert!(matches!(markup.payload(), MarkupData::Callout { .. }));
}

#[test]
fn empty_text_is_discarded() {
    let mut core = engine();
    core.set_tool(Tool::Text);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    let actions = core.submit_text("   ");
    assert!(created_markup(&actions).is_none());
    assert_eq!(core.doc.markup_count(), 0);
    assert!(core.gesture.is_idle());
}

#[test]
fn cancel_text_discards_without_creating() {
    let mut core = engine();
    core.set_tool(Tool::Text);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    core.cancel_text();
    assert!(core.gesture.is_idle());
    assert_eq!(core.doc.markup_count(), 0);
}

#[test]
fn submit_without_an_open_editor_is_a_no_op() {
    let mut core = engine();
    assert!(core.submit_text("orphan").is_empty());
}

// =============================================================
// Pan and zoom
// =============================================================

#[test]
fn middle_button_pans_with_any_tool() {
    let mut core = engine();
    core.set_tool(Tool::Pen);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Middle, no_mods());
    core.on_pointer_move(Point::new(15.0, -5.0), no_mods());
    core.on_pointer_up(Point::new(15.0, -5.0), Button::Middle, no_mods());

    assert_eq!(core.camera.pan_x, 15.0);
    assert_eq!(core.camera.pan_y, -5.0);
    assert_eq!(core.doc.markup_count(), 0);
}

#[test]
fn space_drag_pans_instead_of_drawing() {
    let mut core = engine();
    core.set_tool(Tool::Pen);
    core.on_key_down(&Key(" ".to_owned()), no_mods());

    core.on_pointer_down(Point::new(10.0, 10.0), Button::Primary, no_mods());
    assert!(matches!(core.gesture, GestureState::Panning { .. }));
    core.on_pointer_move(Point::new(30.0, 10.0), no_mods());
    core.on_pointer_up(Point::new(30.0, 10.0), Button::Primary, no_mods());

    assert_eq!(core.camera.pan_x, 20.0);
    assert_eq!(core.doc.markup_count(), 0, "no ink while space is held");
}

#[test]
fn releasing_space_restores_the_active_tool() {
    let mut core = engine();
    core.set_tool(Tool::Pen);
    core.on_key_down(&Key(" ".to_owned()), no_mods());
    core.on_key_up(&Key(" ".to_owned()), no_mods());

    core.on_pointer_down(Point::new(10.0, 10.0), Button::Primary, no_mods());
    assert!(matches!(core.gesture, GestureState::DrawingPath { .. }));
}

#[test]
fn wheel_zooms_around_the_cursor() {
    let mut core = engine();
    let cursor = Point::new(200.0, 150.0);
    let before = core.camera.screen_to_drawing(cursor);
    core.on_wheel(cursor, WheelDelta { dx: 0.0, dy: -100.0 }, no_mods());
    let after = core.camera.screen_to_drawing(cursor);

    assert!(core.camera.zoom > 1.0);
    approx_eq(before.x, after.x);
    approx_eq(before.y, after.y);
}

#[test]
fn keyboard_zoom_clamps_at_both_ends() {
    let mut core = engine();
    for _ in 0..100 {
        core.on_key_down(&Key("+".to_owned()), no_mods());
    }
    assert_eq!(core.camera.zoom, ZOOM_MAX);

    for _ in 0..200 {
        core.on_key_down(&Key("-".to_owned()), no_mods());
    }
    assert_eq!(core.camera.zoom, ZOOM_MIN);
}

#[test]
fn zero_key_resets_the_view() {
    let mut core = engine();
    core.camera.pan_by(40.0, 40.0);
    core.on_key_down(&Key("+".to_owned()), no_mods());
    core.on_key_down(&Key("0".to_owned()), no_mods());
    assert_eq!(core.camera.zoom, 1.0);
    assert_eq!(core.camera.pan_x, 0.0);
    assert_eq!(core.camera.pan_y, 0.0);
}

// =============================================================
// Pins
// =============================================================

#[test]
fn armed_pin_placement_stores_percent_coordinates() {
    let mut core = engine();
    core.set_image_size(1200.0, 900.0);
    core.arm_pin(PinKind::PunchList);

    let actions = core.on_pointer_down(Point::new(120.0, 80.0), Button::Primary, no_mods());
    let pin = created_pin(&actions).expect("pin created");
    approx_eq(pin.x_percent, 10.0);
    approx_eq(pin.y_percent, 80.0 / 900.0 * 100.0);
    assert_eq!(pin.status, PinStatus::Open);
    assert_eq!(pin.color, PinKind::PunchList.default_color());
    assert!(core.ui.armed_pin.is_none(), "placement disarms pin mode");
}

#[test]
fn armed_pin_wins_over_the_active_tool() {
    let mut core = engine();
    core.set_image_size(1000.0, 1000.0);
    core.set_tool(Tool::Rectangle);
    core.arm_pin(PinKind::Rfi);

    let actions = core.on_pointer_down(Point::new(500.0, 500.0), Button::Primary, no_mods());
    assert!(created_pin(&actions).is_some());
    assert!(core.gesture.is_idle(), "no rectangle drag started");
}

#[test]
fn disarm_leaves_pin_mode_without_placing() {
    let mut core = engine();
    core.set_image_size(1000.0, 1000.0);
    core.arm_pin(PinKind::Rfi);
    core.disarm_pin();

    let actions = core.on_pointer_down(Point::new(500.0, 500.0), Button::Primary, no_mods());
    assert!(created_pin(&actions).is_none());
    assert_eq!(core.doc.pin_count(), 0);
}

#[test]
fn pin_filter_is_a_view_setting() {
    let mut core = engine();
    core.set_image_size(1000.0, 1000.0);
    core.arm_pin(PinKind::PunchList);
    core.on_pointer_down(Point::new(100.0, 100.0), Button::Primary, no_mods());

    core.set_pin_filter(PinFilter::Kind(PinKind::Rfi));
    assert!(core.doc.filtered_pins(core.ui.pin_filter).is_empty());
    assert_eq!(core.doc.pin_count(), 1, "filtering deletes nothing");
}

#[test]
fn pin_placement_defers_until_image_size_is_known() {
    let mut core = engine();
    core.arm_pin(PinKind::Inspection);

    let actions = core.on_pointer_down(Point::new(100.0, 100.0), Button::Primary, no_mods());
    assert!(actions.is_empty());
    assert_eq!(core.ui.armed_pin, Some(PinKind::Inspection), "stays armed");
    assert_eq!(core.doc.pin_count(), 0);
}

#[test]
fn pin_placement_honors_the_camera() {
    let mut core = engine();
    core.set_image_size(1000.0, 1000.0);
    core.camera.zoom = 2.0;
    core.camera.pan_x = 100.0;
    core.arm_pin(PinKind::Observation);

    // Screen (300, 400) -> drawing (100, 200) -> 10%, 20%.
    let actions = core.on_pointer_down(Point::new(300.0, 400.0), Button::Primary, no_mods());
    let pin = created_pin(&actions).expect("pin created");
    approx_eq(pin.x_percent, 10.0);
    approx_eq(pin.y_percent, 20.0);
}

#[test]
fn pin_field_edit_emits_a_sparse_update() {
    let mut core = engine();
    core.set_image_size(1000.0, 1000.0);
    core.arm_pin(PinKind::PunchList);
    let actions = core.on_pointer_down(Point::new(500.0, 500.0), Button::Primary, no_mods());
    let id = created_pin(&actions).expect("pin created").id;

    let actions =
        core.update_pin(&id, PartialPin { status: Some(PinStatus::Closed), ..Default::default() });
    let Some(Action::PinUpdated { id: updated, fields }) = actions.first() else {
        panic!("expected a pin update");
    };
    assert_eq!(*updated, id);
    assert_eq!(fields.status, Some(PinStatus::Closed));
    assert!(fields.label.is_none());
    assert_eq!(core.pin(&id).unwrap().status, PinStatus::Closed);
}

#[test]
fn pin_delete_removes_locally_and_emits() {
    let mut core = engine();
    core.set_image_size(1000.0, 1000.0);
    core.arm_pin(PinKind::Incident);
    let actions = core.on_pointer_down(Point::new(500.0, 500.0), Button::Primary, no_mods());
    let id = created_pin(&actions).expect("pin created").id;

    let actions = core.delete_pin(&id);
    assert!(matches!(actions.first(), Some(Action::PinDeleted { id: deleted }) if *deleted == id));
    assert!(core.pin(&id).is_none());
    assert!(core.delete_pin(&id).is_empty(), "second delete is a no-op");
}

// =============================================================
// Escape semantics
// =============================================================

#[test]
fn escape_cancels_the_gesture_first() {
    let mut core = engine();
    core.set_tool(Tool::Rectangle);
    core.on_pointer_down(Point::new(10.0, 10.0), Button::Primary, no_mods());

    core.on_key_down(&Key("Escape".to_owned()), no_mods());
    assert!(core.gesture.is_idle());
    assert_eq!(core.ui.tool, Tool::Rectangle, "tool unchanged on first escape");
    assert_eq!(core.doc.markup_count(), 0, "nothing persisted");
}

#[test]
fn escape_disarms_pin_mode_before_reverting_the_tool() {
    let mut core = engine();
    core.set_tool(Tool::Pen);
    core.arm_pin(PinKind::PunchList);

    core.on_key_down(&Key("Escape".to_owned()), no_mods());
    assert!(core.ui.armed_pin.is_none());
    assert_eq!(core.ui.tool, Tool::Pen, "tool unchanged while disarming");

    core.on_key_down(&Key("Escape".to_owned()), no_mods());
    assert_eq!(core.ui.tool, Tool::Select);
}

#[test]
fn escape_cancels_an_open_text_edit() {
    let mut core = engine();
    core.set_tool(Tool::Text);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    core.on_key_down(&Key("Escape".to_owned()), no_mods());
    assert!(core.gesture.is_idle());
    assert!(core.submit_text("late").is_empty(), "editor is gone");
}

// =============================================================
// Revision scope
// =============================================================

#[test]
fn revision_switch_clears_markups_and_requests_refetch() {
    let mut core = engine();
    let record = saved_line(&core, 0.0, 0.0, 100.0, 0.0);
    core.load_markups(vec![record]);
    core.on_pointer_down(Point::new(50.0, 0.0), Button::Primary, no_mods());
    assert_eq!(core.selection().len(), 1);

    let new_revision = Uuid::new_v4();
    let actions = core.select_revision(Some(new_revision));

    assert_eq!(core.doc.markup_count(), 0, "no markups leak across revisions");
    assert!(core.selection().is_empty());
    assert!(core.image_size.is_none(), "new file's dimensions are unknown");
    assert!(matches!(
        actions.first(),
        Some(Action::MarkupsRefetchNeeded { revision_id }) if *revision_id == Some(new_revision)
    ));
}

#[test]
fn new_markups_carry_the_selected_revision() {
    let mut core = engine();
    let revision = Uuid::new_v4();
    core.select_revision(Some(revision));
    core.set_tool(Tool::Line);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    let actions = core.on_pointer_up(Point::new(10.0, 10.0), Button::Primary, no_mods());

    assert_eq!(created_markup(&actions).expect("markup created").revision_id, Some(revision));
}

// =============================================================
// Optimistic persistence
// =============================================================

#[test]
fn created_markup_is_unsynced_until_confirmed() {
    let mut core = engine();
    core.set_tool(Tool::Line);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    let actions = core.on_pointer_up(Point::new(10.0, 10.0), Button::Primary, no_mods());
    let provisional = created_markup(&actions).expect("markup created").clone();
    assert!(core.doc.is_unsynced(&provisional.id));

    let mut canonical = provisional.clone();
    canonical.id = Uuid::new_v4();
    core.confirm_markup(&provisional.id, canonical.clone());

    assert!(core.markup(&provisional.id).is_none());
    assert!(core.markup(&canonical.id).is_some());
    assert!(!core.doc.is_unsynced(&canonical.id));
}

#[test]
fn failed_write_keeps_the_record_for_retry() {
    let mut core = engine();
    core.set_tool(Tool::Line);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    let actions = core.on_pointer_up(Point::new(10.0, 10.0), Button::Primary, no_mods());
    let id = created_markup(&actions).expect("markup created").id;

    // Gateway failure: record stays, stays flagged, and can be re-issued.
    assert!(core.persistence_failed(&id));
    assert!(core.markup(&id).is_some());
    let retry = core.retry_markup(&id).expect("retryable");
    assert!(matches!(retry, Action::MarkupCreated(markup) if markup.id == id));
}

#[test]
fn confirmed_markup_is_not_retryable() {
    let mut core = engine();
    core.set_tool(Tool::Line);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    let actions = core.on_pointer_up(Point::new(10.0, 10.0), Button::Primary, no_mods());
    let provisional = created_markup(&actions).expect("markup created").clone();

    let mut canonical = provisional.clone();
    canonical.id = Uuid::new_v4();
    core.confirm_markup(&provisional.id, canonical.clone());

    assert!(!core.persistence_failed(&canonical.id));
    assert!(core.retry_markup(&canonical.id).is_none());
}

// =============================================================
// Layers
// =============================================================

#[test]
fn layer_toggle_emits_render_only_when_it_applies() {
    let mut core = engine();
    core.load_layers(vec![Layer {
        id: Uuid::new_v4(),
        drawing_id: core.drawing_id,
        name: "Electrical".to_owned(),
        color: "#1E88E5".to_owned(),
        visible: true,
        created_by: None,
    }]);

    assert!(!core.set_layer_visibility("Electrical", false).is_empty());
    assert!(core.set_layer_visibility(DEFAULT_LAYER, false).is_empty());
    assert!(core.set_layer_visibility("NoSuchLayer", false).is_empty());
}

#[test]
fn new_markups_land_on_the_active_layer() {
    let mut core = engine();
    core.ui.active_layer = "Plumbing".to_owned();
    core.set_tool(Tool::Line);
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary, no_mods());
    let actions = core.on_pointer_up(Point::new(10.0, 10.0), Button::Primary, no_mods());
    assert_eq!(created_markup(&actions).expect("markup created").layer, "Plumbing");
}
