//! Canvas 2D rendering module
//!
//! `shapes` is pure geometry and builds everywhere; the canvas backend is
//! browser-only.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
