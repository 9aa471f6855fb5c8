//! Markup and annotation engine for construction drawings.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the drawing viewer: translating raw DOM input events into
//! markup and pin mutations, maintaining camera state for pan/zoom over the
//! drawing image, hit-testing saved markups, and rendering the scene. The host
//! layer is responsible only for wiring DOM events to the engine and persisting
//! the resulting [`engine::Action`]s to the gateway.
//!
//! All geometry math and state transitions are pure and synchronous; nothing
//! in this crate performs I/O. Persisted geometry is resolution-independent:
//! pins travel as percent coordinates, markup payloads as drawing-space
//! floats inside a tagged payload (see [`doc::MarkupData`]).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Markup/pin/layer records and the in-memory store |
//! | [`camera`] | Pan/zoom camera and screen/drawing/percent conversions |
//! | [`geometry`] | Pure point-sequence → payload builders per markup kind |
//! | [`input`] | Tools, modifiers, and the gesture state machine |
//! | [`hit`] | Hit-testing against saved markups |
//! | [`render`] | Scene assembly: markups + live gesture + pins → primitives |
//! | [`paint`] | Primitives → Canvas2D calls |
//! | [`keys`] | Scoped keyboard subscription (RAII attach/detach) |
//! | [`consts`] | Shared numeric constants (zoom limits, arrowhead, slop) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod keys;
pub mod paint;
pub mod render;
