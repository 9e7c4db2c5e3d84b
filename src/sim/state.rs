//! Game state and core simulation types
//!
//! One `GameSession` owns every entity container plus the phase machine.
//! All randomness flows through the session's seeded RNG so a seed plus an
//! input sequence replays identically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::SpriteCatalog;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; only the exit button is live
    GameOver,
}

/// Events the simulation emits for the frontend (sound cues, exit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LaserFired,
    MeteorExploded,
    PlayerHit,
    ExitRequested,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Center position in screen pixels
    pub pos: Vec2,
    /// Current movement direction (unit length or zero)
    pub dir: Vec2,
    /// Seconds until the next shot is allowed
    pub cooldown: f32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0),
            dir: Vec2::ZERO,
            cooldown: 0.0,
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.cooldown <= 0.0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A laser bolt, center position, travels straight up
#[derive(Debug, Clone, Copy)]
pub struct Laser {
    pub pos: Vec2,
}

/// A falling meteor
#[derive(Debug, Clone, Copy)]
pub struct Meteor {
    pub pos: Vec2,
    /// Direction of travel; x is drift, y is 1. Deliberately unnormalized,
    /// so strong drift also falls slightly faster.
    pub dir: Vec2,
    /// Scalar speed in pixels/s
    pub speed: f32,
    /// Accumulated rotation in degrees
    pub rotation: f32,
    /// Spin in degrees/s
    pub rotation_speed: f32,
    /// Seconds since spawn
    pub age: f32,
}

/// A playing explosion animation
#[derive(Debug, Clone, Copy)]
pub struct Explosion {
    pub pos: Vec2,
    /// Fractional frame index, advanced at `EXPLOSION_FRAME_RATE`
    pub frame: f32,
}

/// A static background star
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; all gameplay randomness draws from here
    pub rng: Pcg32,
    /// Seconds since session start
    pub elapsed: f32,
    pub phase: GamePhase,
    /// Score captured at the fatal collision
    pub final_score: u32,
    pub player: Player,
    pub lasers: Vec<Laser>,
    pub meteors: Vec<Meteor>,
    pub explosions: Vec<Explosion>,
    pub stars: Vec<Star>,
    /// Sprite sizes and collision masks
    pub sprites: SpriteCatalog,
    /// Disables the per-frame meteor roll (deterministic tests)
    pub spawning_enabled: bool,
}

impl GameSession {
    /// Create a new session with the given seed. Stars are placed
    /// immediately from the session RNG.
    pub fn new(seed: u64, sprites: SpriteCatalog) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..=WINDOW_WIDTH),
                    rng.random_range(0.0..=WINDOW_HEIGHT),
                ),
            })
            .collect();

        Self {
            seed,
            rng,
            elapsed: 0.0,
            phase: GamePhase::Running,
            final_score: 0,
            player: Player::new(),
            lasers: Vec::new(),
            meteors: Vec::new(),
            explosions: Vec::new(),
            stars,
            sprites,
            spawning_enabled: true,
        }
    }

    /// Whole seconds survived; frozen once the run ends.
    pub fn score(&self) -> u32 {
        match self.phase {
            GamePhase::Running => self.elapsed as u32,
            GamePhase::GameOver => self.final_score,
        }
    }

    /// Spawn a meteor at the given position with session-random motion.
    pub fn spawn_meteor(&mut self, pos: Vec2) {
        let dir = Vec2::new(self.rng.random_range(-METEOR_DRIFT..=METEOR_DRIFT), 1.0);
        let meteor = Meteor {
            pos,
            dir,
            speed: self.rng.random_range(METEOR_SPEED_MIN..=METEOR_SPEED_MAX),
            rotation: 0.0,
            rotation_speed: self
                .rng
                .random_range(METEOR_ROTATION_MIN..=METEOR_ROTATION_MAX),
            age: 0.0,
        };
        self.meteors.push(meteor);
    }
}
