#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

// =============================================================
// Tool classification
// =============================================================

#[test]
fn default_tool_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn drag_shape_tools() {
    for tool in [Tool::Line, Tool::Arrow, Tool::Rectangle, Tool::Circle, Tool::Dimension] {
        assert!(tool.is_drag_shape(), "{tool:?} should drag a shape");
    }
    for tool in [Tool::Select, Tool::Pen, Tool::Cloud, Tool::Text, Tool::Stamp] {
        assert!(!tool.is_drag_shape(), "{tool:?} should not drag a shape");
    }
}

#[test]
fn path_tools() {
    assert!(Tool::Pen.is_path());
    assert!(Tool::Cloud.is_path());
    assert!(!Tool::Line.is_path());
}

#[test]
fn text_tools() {
    assert!(Tool::Text.is_text());
    assert!(Tool::Callout.is_text());
    assert!(!Tool::Stamp.is_text());
}

#[test]
fn click_create_tools() {
    assert!(Tool::Stamp.is_click_create());
    assert!(Tool::Hyperlink.is_click_create());
    assert!(!Tool::Callout.is_click_create());
}

#[test]
fn classes_are_disjoint() {
    let all = [
        Tool::Select,
        Tool::Pen,
        Tool::Line,
        Tool::Arrow,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Cloud,
        Tool::Text,
        Tool::Callout,
        Tool::Stamp,
        Tool::Dimension,
        Tool::Hyperlink,
    ];
    for tool in all {
        let classes = usize::from(tool.is_drag_shape())
            + usize::from(tool.is_path())
            + usize::from(tool.is_text())
            + usize::from(tool.is_click_create());
        assert!(classes <= 1, "{tool:?} is in more than one class");
    }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn ui_state_defaults() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Select);
    assert!(ui.selection.is_empty());
    assert!(ui.armed_pin.is_none());
    assert_eq!(ui.pin_filter, PinFilter::All);
    assert_eq!(ui.active_layer, DEFAULT_LAYER);
    assert_eq!(ui.stroke_width, DEFAULT_STROKE_WIDTH);
}

#[test]
fn gesture_defaults_to_idle() {
    assert!(GestureState::default().is_idle());
    assert!(!GestureState::Panning { last_screen: Point::new(0.0, 0.0) }.is_idle());
    assert!(!GestureState::DrawingPath { points: Vec::new() }.is_idle());
}
