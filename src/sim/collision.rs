//! Collision detection
//!
//! Two collision regimes: axis-aligned boxes for laser hits (the meteor box
//! is the bounding box of the rotated sprite) and pixel masks for the fatal
//! player check.

use glam::Vec2;

use super::mask::{PixelMask, masks_collide};

/// Axis-aligned bounding box in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Overlapping region of two boxes, if any.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.x < max.x && min.y < max.y {
            Some(Aabb { min, max })
        } else {
            None
        }
    }
}

/// Bounding-box size of a `size` rectangle rotated by `degrees`.
pub fn rotated_extent(size: Vec2, degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}

/// Laser vs meteor: box test against the rotated meteor's bounding box.
pub fn laser_hits_meteor(
    laser_center: Vec2,
    laser_size: Vec2,
    meteor_center: Vec2,
    meteor_size: Vec2,
    meteor_rotation_deg: f32,
) -> bool {
    let laser_box = Aabb::from_center_size(laser_center, laser_size);
    let meteor_box = Aabb::from_center_size(
        meteor_center,
        rotated_extent(meteor_size, meteor_rotation_deg),
    );
    laser_box.intersects(&meteor_box)
}

/// Player vs meteor: pixel-accurate mask test. The meteor mask is sampled
/// through its current rotation.
pub fn player_hits_meteor(
    player_mask: &PixelMask,
    player_center: Vec2,
    meteor_mask: &PixelMask,
    meteor_center: Vec2,
    meteor_rotation_deg: f32,
) -> bool {
    masks_collide(
        player_mask,
        player_center,
        meteor_mask,
        meteor_center,
        meteor_rotation_deg,
    )
}
