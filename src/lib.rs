//! Shape interaction engine for a small vector drawing canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the drawing: translating pointer events into shape
//! mutations, hit-testing and handle-based resizing, rendering the scene, and
//! persisting the drawing to local storage. The host JavaScript layer is
//! responsible only for wiring DOM events and toolbar controls to the
//! [`engine::Engine`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`shape`] | Shape records, style, draft, and the ordered store |
//! | [`geom`] | Pure hit-testing and handle placement |
//! | [`input`] | Cursor, UI state, and the gesture state machine |
//! | [`render`] | Scene rendering to a 2D context |
//! | [`persist`] | Storage adapter trait and its backends |
//! | [`consts`] | Shared numeric constants (handle size, hit tolerances) |

pub mod consts;
pub mod engine;
pub mod geom;
pub mod input;
pub mod persist;
pub mod render;
pub mod shape;
