//! Round simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (platform pool order)
//! - No rendering, audio or platform dependencies
//! - No errors; inputs are well-formed by construction

pub mod camera;
pub mod collision;
pub mod platform;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{landing_platform, lands_on};
pub use platform::{MoveRange, Platform, PlatformKind};
pub use player::{Facing, Player};
pub use state::{GameEvent, RoundState};
pub use tick::{TickInput, tick};
