//! Meteor Storm - a single-screen meteor shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `assets`: Sprite loading and collision masks
//! - `audio`: Procedural one-shot sound effects
//! - `input`: Keyboard/pointer state tracking

pub mod assets;
pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Window dimensions in pixels
    pub const WINDOW_WIDTH: f32 = 1280.0;
    pub const WINDOW_HEIGHT: f32 = 720.0;

    /// Target frame rate for the pacing loop
    pub const TARGET_FPS: u32 = 60;

    /// Player ship speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 300.0;
    /// Minimum time between laser shots (seconds)
    pub const LASER_COOLDOWN: f32 = 0.4;
    /// Laser travel speed, straight up (pixels/s)
    pub const LASER_SPEED: f32 = 400.0;

    /// Meteor fall speed range (pixels/s)
    pub const METEOR_SPEED_MIN: f32 = 400.0;
    pub const METEOR_SPEED_MAX: f32 = 500.0;
    /// Horizontal drift range; direction is (drift, 1) and NOT normalized
    pub const METEOR_DRIFT: f32 = 0.5;
    /// Meteor spin range (degrees/s)
    pub const METEOR_ROTATION_MIN: f32 = 40.0;
    pub const METEOR_ROTATION_MAX: f32 = 80.0;
    /// Meteors despawn this many seconds after creation
    pub const METEOR_LIFETIME: f32 = 3.0;
    /// Per-frame spawn chance is 1 in this
    pub const METEOR_SPAWN_ODDS: u32 = 17;
    /// Meteors spawn above the visible area
    pub const METEOR_SPAWN_Y: f32 = -50.0;

    /// Background star count, placed once per session
    pub const STAR_COUNT: usize = 20;

    /// Explosion animation: frame count and playback rate (frames/s)
    pub const EXPLOSION_FRAME_COUNT: usize = 21;
    pub const EXPLOSION_FRAME_RATE: f32 = 20.0;

    /// Alpha above this counts as solid for mask collision
    pub const MASK_ALPHA_THRESHOLD: u8 = 127;

    /// End Game button: size and vertical offset below screen center
    pub const END_BUTTON_WIDTH: f32 = 200.0;
    pub const END_BUTTON_HEIGHT: f32 = 50.0;
    pub const END_BUTTON_Y_OFFSET: f32 = 100.0;
}
