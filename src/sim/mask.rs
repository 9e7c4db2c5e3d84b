//! Pixel collision masks
//!
//! A `PixelMask` is a bitmap of solid pixels derived from a sprite's alpha
//! channel. Masks are built once at load time and sampled during collision
//! checks; the meteor mask is sampled through its current rotation angle so
//! the silhouette tracks the drawn sprite.

use glam::Vec2;

/// Bitmap of solid pixels for one sprite.
#[derive(Debug, Clone)]
pub struct PixelMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl PixelMask {
    /// Build a mask from RGBA pixel data. A pixel is solid when its alpha
    /// exceeds `threshold`.
    pub fn from_alpha(width: u32, height: u32, rgba: &[u8], threshold: u8) -> Self {
        debug_assert_eq!(rgba.len(), (width * height * 4) as usize);
        let bits = rgba
            .chunks_exact(4)
            .map(|px| px[3] > threshold)
            .collect();
        Self {
            width,
            height,
            bits,
        }
    }

    /// Fully solid rectangle, for tests and simple sprites.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sprite dimensions as a vector.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Whether the pixel at (x, y) is solid. Out of bounds is empty.
    pub fn solid_at(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Sample at a point in the sprite's local frame, origin at the sprite
    /// center. Nearest-pixel lookup.
    pub fn solid_at_local(&self, local: Vec2) -> bool {
        let x = (local.x + self.width as f32 / 2.0).floor() as i32;
        let y = (local.y + self.height as f32 / 2.0).floor() as i32;
        self.solid_at(x, y)
    }

    /// Count of solid pixels (used by tests).
    pub fn solid_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Test whether two masks overlap. `a` is axis-aligned at `a_center`;
/// `b` is rotated by `b_rotation_deg` about `b_center`.
///
/// Iterates `a`'s pixels restricted to the overlap of both bounding boxes and
/// maps each solid pixel into `b`'s rotated local frame.
pub fn masks_collide(
    a: &PixelMask,
    a_center: Vec2,
    b: &PixelMask,
    b_center: Vec2,
    b_rotation_deg: f32,
) -> bool {
    use super::collision::{Aabb, rotated_extent};

    let a_box = Aabb::from_center_size(a_center, a.size());
    let b_box = Aabb::from_center_size(b_center, rotated_extent(b.size(), b_rotation_deg));
    let Some(overlap) = a_box.intersection(&b_box) else {
        return false;
    };

    // Inverse rotation takes world offsets into b's local frame.
    let rad = -b_rotation_deg.to_radians();
    let (sin, cos) = rad.sin_cos();

    let a_min = a_box.min;
    let x0 = (overlap.min.x - a_min.x).floor() as i32;
    let y0 = (overlap.min.y - a_min.y).floor() as i32;
    let x1 = (overlap.max.x - a_min.x).ceil() as i32;
    let y1 = (overlap.max.y - a_min.y).ceil() as i32;

    for y in y0..y1 {
        for x in x0..x1 {
            if !a.solid_at(x, y) {
                continue;
            }
            // Pixel center in world coordinates.
            let world = a_min + Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let rel = world - b_center;
            let local = Vec2::new(rel.x * cos - rel.y * sin, rel.x * sin + rel.y * cos);
            if b.solid_at_local(local) {
                return true;
            }
        }
    }
    false
}
