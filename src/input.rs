//! Keyboard and pointer state
//!
//! Accumulates winit events into held/just-pressed sets, then snapshots a
//! `FrameInput` for the simulation once per frame. Edge flags are cleared at
//! the end of each frame.

use std::collections::HashSet;

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::sim::FrameInput;

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
    pub cursor: Vec2,
    clicked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: KeyCode) {
        // Key repeat must not re-trigger edges
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn mouse_down(&mut self) {
        self.clicked = true;
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Snapshot the simulation input for this frame.
    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            left: self.is_held(KeyCode::ArrowLeft) || self.is_held(KeyCode::KeyA),
            right: self.is_held(KeyCode::ArrowRight) || self.is_held(KeyCode::KeyD),
            up: self.is_held(KeyCode::ArrowUp) || self.is_held(KeyCode::KeyW),
            down: self.is_held(KeyCode::ArrowDown) || self.is_held(KeyCode::KeyS),
            fire: self.is_just_pressed(KeyCode::Space),
            cursor: self.cursor,
            click: self.clicked,
        }
    }

    /// Clear edge-triggered state; held keys persist.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.clicked = false;
    }
}
