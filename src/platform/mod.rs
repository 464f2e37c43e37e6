//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing and animation-frame scheduling
//! - Input events (keyboard, touch)
//! - Asset loading

pub mod assets;
pub mod frame;
pub mod input;

pub use assets::{AssetManifest, ImageAsset, LoadStatus, SpriteKey};
#[cfg(target_arch = "wasm32")]
pub use assets::{LoadedImages, load_images};
pub use frame::{FrameClock, FrameHandle};
pub use input::{Control, Controls, KeyFocus};
