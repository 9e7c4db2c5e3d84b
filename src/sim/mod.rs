//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod mask;
pub mod state;
pub mod tick;

pub use collision::{Aabb, laser_hits_meteor, player_hits_meteor, rotated_extent};
pub use mask::{PixelMask, masks_collide};
pub use state::{Explosion, GameEvent, GamePhase, GameSession, Laser, Meteor, Player, Star};
pub use tick::{FrameInput, end_button_rect, tick};
