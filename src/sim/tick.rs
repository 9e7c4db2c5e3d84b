//! Per-frame simulation step
//!
//! `tick` advances the session by one frame and returns the events the
//! frontend should react to (sound cues, exit request). The simulation never
//! touches the platform directly.

use glam::Vec2;
use rand::Rng;

use super::collision::{Aabb, laser_hits_meteor, player_hits_meteor};
use super::state::{Explosion, GameEvent, GamePhase, GameSession, Laser};
use crate::consts::*;

/// Input snapshot for a single frame (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Held movement keys
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire was pressed this frame (edge)
    pub fire: bool,
    /// Pointer position in screen pixels
    pub cursor: Vec2,
    /// Left button was pressed this frame (edge)
    pub click: bool,
}

/// Screen rectangle of the End Game button shown after a run ends.
pub fn end_button_rect() -> Aabb {
    Aabb::from_center_size(
        Vec2::new(
            WINDOW_WIDTH / 2.0,
            WINDOW_HEIGHT / 2.0 + END_BUTTON_Y_OFFSET + END_BUTTON_HEIGHT / 2.0,
        ),
        Vec2::new(END_BUTTON_WIDTH, END_BUTTON_HEIGHT),
    )
}

/// Advance the session by one frame of `dt` seconds.
pub fn tick(session: &mut GameSession, input: &FrameInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if session.phase == GamePhase::GameOver {
        // Entities are frozen; only the exit button is live.
        if input.click && end_button_rect().contains_point(input.cursor) {
            events.push(GameEvent::ExitRequested);
        }
        return events;
    }

    session.elapsed += dt;

    // Player movement: axis input, diagonals normalized to unit length.
    let dir = Vec2::new(
        (input.right as i32 - input.left as i32) as f32,
        (input.down as i32 - input.up as i32) as f32,
    )
    .normalize_or_zero();
    session.player.dir = dir;
    session.player.pos += dir * PLAYER_SPEED * dt;

    // Shooting, gated by the cooldown.
    session.player.cooldown = (session.player.cooldown - dt).max(0.0);
    if input.fire && session.player.can_shoot() {
        let player_h = session.sprites.player.size.y;
        let laser_h = session.sprites.laser.size.y;
        session.lasers.push(Laser {
            pos: session.player.pos - Vec2::new(0.0, player_h / 2.0 + laser_h / 2.0),
        });
        session.player.cooldown = LASER_COOLDOWN;
        events.push(GameEvent::LaserFired);
    }

    // Lasers travel straight up and despawn once fully off the top.
    let laser_half_h = session.sprites.laser.size.y / 2.0;
    for laser in &mut session.lasers {
        laser.pos.y -= LASER_SPEED * dt;
    }
    session.lasers.retain(|l| l.pos.y + laser_half_h >= 0.0);

    // Meteors fall, spin, and age out.
    for meteor in &mut session.meteors {
        meteor.pos += meteor.dir * meteor.speed * dt;
        meteor.rotation += meteor.rotation_speed * dt;
        meteor.age += dt;
    }
    session.meteors.retain(|m| m.age < METEOR_LIFETIME);

    // Explosion playback.
    for explosion in &mut session.explosions {
        explosion.frame += EXPLOSION_FRAME_RATE * dt;
    }
    session
        .explosions
        .retain(|e| e.frame < EXPLOSION_FRAME_COUNT as f32);

    // Fatal check: player mask against every meteor mask. Any hit ends the
    // run on this frame; the rest of the frame is unobservable and skipped.
    let player_pos = session.player.pos;
    let mut fatal = false;
    let (player_mask, meteor_mask) = (&session.sprites.player.mask, &session.sprites.meteor.mask);
    session.meteors.retain(|m| {
        let hit = player_hits_meteor(player_mask, player_pos, meteor_mask, m.pos, m.rotation);
        fatal |= hit;
        !hit
    });
    if fatal {
        session.phase = GamePhase::GameOver;
        session.final_score = session.elapsed as u32;
        events.push(GameEvent::PlayerHit);
        return events;
    }

    // Laser hits: each laser resolves at most one meteor per frame (first in
    // iteration order). Both despawn and an explosion starts at the laser's
    // top-center.
    let laser_size = session.sprites.laser.size;
    let meteor_size = session.sprites.meteor.size;
    let mut i = 0;
    while i < session.lasers.len() {
        let laser = session.lasers[i];
        let hit = session
            .meteors
            .iter()
            .position(|m| laser_hits_meteor(laser.pos, laser_size, m.pos, meteor_size, m.rotation));
        if let Some(j) = hit {
            session.meteors.swap_remove(j);
            session.lasers.swap_remove(i);
            session.explosions.push(Explosion {
                pos: laser.pos - Vec2::new(0.0, laser_half_h),
                frame: 0.0,
            });
            events.push(GameEvent::MeteorExploded);
        } else {
            i += 1;
        }
    }

    // Independent per-frame spawn roll.
    if session.spawning_enabled && session.rng.random_range(0..METEOR_SPAWN_ODDS) == 0 {
        let x = session.rng.random_range(0.0..=WINDOW_WIDTH);
        session.spawn_meteor(Vec2::new(x, METEOR_SPAWN_Y));
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteCatalog;
    use crate::sim::state::Meteor;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_session(seed: u64) -> GameSession {
        let mut session = GameSession::new(seed, SpriteCatalog::synthetic());
        session.spawning_enabled = false;
        session
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn test_player_moves_at_speed() {
        let mut session = quiet_session(1);
        let start = session.player.pos;
        let input = FrameInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut session, &input, DT);
        }
        let moved = session.player.pos.x - start.x;
        assert!((moved - PLAYER_SPEED).abs() < 0.5, "moved {moved}");
        assert_eq!(session.player.pos.y, start.y);
    }

    #[test]
    fn test_diagonal_speed_is_not_faster() {
        let mut session = quiet_session(1);
        let start = session.player.pos;
        let input = FrameInput {
            right: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut session, &input, DT);
        }
        let dist = (session.player.pos - start).length();
        assert!((dist - PLAYER_SPEED).abs() < 0.5, "dist {dist}");
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut session = quiet_session(1);
        let start = session.player.pos;
        let input = FrameInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut session, &input, DT);
        assert_eq!(session.player.pos, start);
    }

    #[test]
    fn test_fire_spawns_laser_at_ship_nose() {
        let mut session = quiet_session(1);
        let input = FrameInput {
            fire: true,
            ..Default::default()
        };
        let events = tick(&mut session, &input, DT);
        assert!(events.contains(&GameEvent::LaserFired));
        assert_eq!(session.lasers.len(), 1);

        let player_h = session.sprites.player.size.y;
        let laser_h = session.sprites.laser.size.y;
        let laser = session.lasers[0];
        assert_eq!(laser.pos.x, session.player.pos.x);
        // One frame of travel since the spawn
        let expected_y = session.player.pos.y - player_h / 2.0 - laser_h / 2.0 - LASER_SPEED * DT;
        assert!((laser.pos.y - expected_y).abs() < 1e-3);
    }

    #[test]
    fn test_cooldown_blocks_rapid_fire() {
        let mut session = quiet_session(1);
        let input = FrameInput {
            fire: true,
            ..Default::default()
        };
        // Holding fire every frame for 0.3 s yields exactly one laser
        for _ in 0..18 {
            tick(&mut session, &input, DT);
        }
        assert_eq!(session.lasers.len(), 1);
        // After the cooldown elapses a second shot goes out
        for _ in 0..12 {
            tick(&mut session, &input, DT);
        }
        assert_eq!(session.lasers.len(), 2);
    }

    #[test]
    fn test_laser_despawns_above_top() {
        let mut session = quiet_session(1);
        session.lasers.push(Laser {
            pos: Vec2::new(100.0, 40.0),
        });
        // Worst-case travel time from anywhere on screen
        let frames = (WINDOW_HEIGHT / LASER_SPEED / DT).ceil() as u32 + 2;
        for _ in 0..frames {
            tick(&mut session, &idle(), DT);
        }
        assert!(session.lasers.is_empty());
    }

    #[test]
    fn test_meteor_ages_out() {
        let mut session = quiet_session(1);
        session.meteors.push(Meteor {
            pos: Vec2::new(5000.0, 5000.0), // far from the player
            dir: Vec2::new(0.0, 1.0),
            speed: 0.0,
            rotation: 0.0,
            rotation_speed: 50.0,
            age: 0.0,
        });
        let frames = (METEOR_LIFETIME / DT).ceil() as u32 + 1;
        for _ in 0..frames {
            tick(&mut session, &idle(), DT);
        }
        assert!(session.meteors.is_empty());
    }

    #[test]
    fn test_laser_hit_removes_both_and_spawns_explosion() {
        let mut session = quiet_session(1);
        session.lasers.push(Laser {
            pos: Vec2::new(200.0, 300.0),
        });
        session.meteors.push(Meteor {
            pos: Vec2::new(200.0, 280.0),
            dir: Vec2::new(0.0, 1.0),
            speed: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            age: 0.0,
        });
        let events = tick(&mut session, &idle(), DT);
        assert!(events.contains(&GameEvent::MeteorExploded));
        assert!(session.lasers.is_empty());
        assert!(session.meteors.is_empty());
        assert_eq!(session.explosions.len(), 1);
    }

    #[test]
    fn test_one_laser_kills_at_most_one_meteor() {
        let mut session = quiet_session(1);
        // Keep the stack clear of the player so the mask pass stays quiet
        session.player.pos = Vec2::new(1000.0, 600.0);
        session.lasers.push(Laser {
            pos: Vec2::new(200.0, 300.0),
        });
        for dx in [-10.0, 10.0] {
            session.meteors.push(Meteor {
                pos: Vec2::new(200.0 + dx, 290.0),
                dir: Vec2::new(0.0, 1.0),
                speed: 0.0,
                rotation: 0.0,
                rotation_speed: 0.0,
                age: 0.0,
            });
        }
        tick(&mut session, &idle(), DT);
        assert_eq!(session.meteors.len(), 1);
        assert!(session.lasers.is_empty());
        assert_eq!(session.explosions.len(), 1);
    }

    #[test]
    fn test_meteor_on_player_ends_run() {
        let mut session = quiet_session(1);
        session.meteors.push(Meteor {
            pos: session.player.pos,
            dir: Vec2::new(0.0, 1.0),
            speed: 0.0,
            rotation: 12.0,
            rotation_speed: 0.0,
            age: 0.0,
        });
        let events = tick(&mut session, &idle(), DT);
        assert!(events.contains(&GameEvent::PlayerHit));
        assert_eq!(session.phase, GamePhase::GameOver);
        assert!(session.meteors.is_empty());
    }

    #[test]
    fn test_game_over_freezes_everything() {
        let mut session = quiet_session(1);
        session.meteors.push(Meteor {
            pos: session.player.pos,
            dir: Vec2::new(0.0, 1.0),
            speed: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            age: 0.0,
        });
        tick(&mut session, &idle(), DT);
        assert_eq!(session.phase, GamePhase::GameOver);

        let score = session.score();
        let pos = session.player.pos;
        let input = FrameInput {
            right: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut session, &input, DT);
        }
        assert_eq!(session.score(), score);
        assert_eq!(session.player.pos, pos);
        assert!(session.lasers.is_empty());
    }

    #[test]
    fn test_end_button_click_requests_exit() {
        let mut session = quiet_session(1);
        session.phase = GamePhase::GameOver;

        // Click outside the button does nothing
        let miss = FrameInput {
            click: true,
            cursor: Vec2::new(10.0, 10.0),
            ..Default::default()
        };
        assert!(tick(&mut session, &miss, DT).is_empty());

        let hit = FrameInput {
            click: true,
            cursor: Vec2::new(
                WINDOW_WIDTH / 2.0,
                WINDOW_HEIGHT / 2.0 + END_BUTTON_Y_OFFSET + END_BUTTON_HEIGHT / 2.0,
            ),
            ..Default::default()
        };
        let events = tick(&mut session, &hit, DT);
        assert!(events.contains(&GameEvent::ExitRequested));
    }

    #[test]
    fn test_idle_five_seconds_scores_five() {
        let mut session = quiet_session(99);
        let start = session.player.pos;
        // A hair past 5 s so f32 accumulation can't land short
        for _ in 0..302 {
            tick(&mut session, &idle(), DT);
        }
        assert_eq!(session.score(), 5);
        assert_eq!(session.player.pos, start);
        assert!(session.meteors.is_empty());
        assert_eq!(session.phase, GamePhase::Running);
    }

    #[test]
    fn test_identical_seeds_replay_identically() {
        let mut a = GameSession::new(5150, SpriteCatalog::synthetic());
        let mut b = GameSession::new(5150, SpriteCatalog::synthetic());
        let input = FrameInput {
            left: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..600 {
            let ea = tick(&mut a, &input, DT);
            let eb = tick(&mut b, &input, DT);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.meteors.len(), b.meteors.len());
        for (ma, mb) in a.meteors.iter().zip(&b.meteors) {
            assert_eq!(ma.pos, mb.pos);
            assert_eq!(ma.rotation, mb.rotation);
        }
        assert_eq!(a.score(), b.score());
    }
}
