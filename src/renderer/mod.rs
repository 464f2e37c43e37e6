//! Rendering module
//!
//! `scene` turns round state into an ordered sprite list; `canvas` blits it
//! with the 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::Sprite;
