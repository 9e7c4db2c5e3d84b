//! Frame assembly
//!
//! Walks the session each frame and tessellates everything visible into one
//! vertex list: stars, ship, lasers, meteors, explosions, the score readout,
//! and the game-over overlay.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{GamePhase, GameSession, end_button_rect};

/// Height of the in-game score digits
const SCORE_HEIGHT: f32 = 40.0;

/// Build the full vertex list for one frame.
pub fn build(session: &GameSession) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(2048);

    for star in &session.stars {
        // Diamond sparkle, sized off the sprite
        let radius = session.sprites.star.size.x / 6.0;
        vertices.extend(shapes::polygon(star.pos, radius, colors::STAR, 4, 0.0));
    }

    draw_ship(&mut vertices, session);

    let laser_size = session.sprites.laser.size;
    for laser in &session.lasers {
        vertices.extend(shapes::quad(laser.pos, laser_size, colors::LASER));
    }

    let meteor_radius = session.sprites.meteor.size.min_element() / 2.0;
    for meteor in &session.meteors {
        // Nonagon with the rotation as phase so the spin is visible
        vertices.extend(shapes::polygon(
            meteor.pos,
            meteor_radius + 3.0,
            colors::METEOR_RIM,
            9,
            meteor.rotation,
        ));
        vertices.extend(shapes::polygon(
            meteor.pos,
            meteor_radius,
            colors::METEOR,
            9,
            meteor.rotation,
        ));
    }

    let explosion_max = session.sprites.explosion_size.x / 2.0;
    for explosion in &session.explosions {
        let t = (explosion.frame / EXPLOSION_FRAME_COUNT as f32).clamp(0.0, 1.0);
        let outer = explosion_max * (0.25 + 0.75 * t);
        let inner = (outer - 10.0).max(0.0);
        let mut color = colors::EXPLOSION;
        color[3] *= 1.0 - t * 0.8;
        vertices.extend(shapes::ring(explosion.pos, inner, outer, color, 24));
    }

    draw_score(&mut vertices, session);

    if session.phase == GamePhase::GameOver {
        draw_game_over(&mut vertices, session);
    }

    vertices
}

/// Ship: triangular hull with a cockpit dot, sized from the sprite.
fn draw_ship(vertices: &mut Vec<Vertex>, session: &GameSession) {
    let pos = session.player.pos;
    let size = session.sprites.player.size;
    let half = size / 2.0;

    let nose = pos + Vec2::new(0.0, -half.y);
    let left = pos + Vec2::new(-half.x * 0.85, half.y);
    let right = pos + Vec2::new(half.x * 0.85, half.y);
    vertices.extend(shapes::triangle(nose, left, right, colors::SHIP_HULL));
    vertices.extend(shapes::circle(
        pos + Vec2::new(0.0, -half.y * 0.25),
        size.x * 0.09,
        colors::SHIP_COCKPIT,
        12,
    ));
}

/// Survival-time readout, boxed at the bottom center like a scoreboard.
fn draw_score(vertices: &mut Vec<Vertex>, session: &GameSession) {
    let score = session.score();
    let digits = count_digits(score);
    let text_w = digits as f32 * SCORE_HEIGHT * 0.6 + (digits - 1) as f32 * SCORE_HEIGHT * 0.25;
    let bottom = WINDOW_HEIGHT - 80.0;
    let top = bottom - SCORE_HEIGHT;

    vertices.extend(shapes::number(
        score,
        WINDOW_WIDTH / 2.0,
        top,
        SCORE_HEIGHT,
        colors::SCORE,
    ));
    vertices.extend(shapes::rect_outline(
        Vec2::new(WINDOW_WIDTH / 2.0, (top + bottom) / 2.0),
        Vec2::new(text_w + 40.0, SCORE_HEIGHT + 28.0),
        4.0,
        colors::SCORE,
    ));
}

/// Dimming overlay, the frozen score writ large, and the End Game button.
fn draw_game_over(vertices: &mut Vec<Vertex>, session: &GameSession) {
    vertices.extend(shapes::quad(
        Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0),
        Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        colors::OVERLAY,
    ));

    vertices.extend(shapes::number(
        session.score(),
        WINDOW_WIDTH / 2.0,
        WINDOW_HEIGHT / 2.0 - 140.0,
        80.0,
        colors::SCORE,
    ));

    let button = end_button_rect();
    let center = (button.min + button.max) / 2.0;
    let size = button.max - button.min;
    vertices.extend(shapes::quad(center, size, colors::BUTTON));
    // Label strip where the caption sits
    vertices.extend(shapes::quad(
        center,
        Vec2::new(size.x * 0.6, 8.0),
        colors::BUTTON_TEXT,
    ));
}

fn count_digits(mut value: u32) -> u32 {
    let mut n = 1;
    while value >= 10 {
        value /= 10;
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteCatalog;
    use crate::sim::{FrameInput, tick};

    #[test]
    fn test_running_scene_is_finite() {
        let mut session = GameSession::new(3, SpriteCatalog::synthetic());
        for _ in 0..120 {
            tick(&mut session, &FrameInput::default(), 1.0 / 60.0);
        }
        let vertices = build(&session);
        assert!(!vertices.is_empty());
        for v in &vertices {
            assert!(v.position[0].is_finite() && v.position[1].is_finite());
        }
    }

    #[test]
    fn test_game_over_adds_overlay_geometry() {
        let mut session = GameSession::new(3, SpriteCatalog::synthetic());
        let running = build(&session).len();
        session.phase = GamePhase::GameOver;
        let over = build(&session).len();
        assert!(over > running);
    }

    #[test]
    fn test_count_digits() {
        assert_eq!(count_digits(0), 1);
        assert_eq!(count_digits(9), 1);
        assert_eq!(count_digits(10), 2);
        assert_eq!(count_digits(12345), 5);
    }
}
