//! Sprite loading
//!
//! Sprites live at fixed paths under `assets/images/`. They are decoded once
//! at startup; the simulation keeps only their sizes and alpha-derived
//! collision masks, so a missing or corrupt file is fatal before the window
//! ever opens.

use std::path::{Path, PathBuf};

use glam::Vec2;
use thiserror::Error;

use crate::consts::{EXPLOSION_FRAME_COUNT, MASK_ALPHA_THRESHOLD};
use crate::sim::PixelMask;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load sprite {path}: {source}")]
    Sprite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// One loaded sprite: pixel dimensions plus its collision mask.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub size: Vec2,
    pub mask: PixelMask,
}

impl Sprite {
    fn load(path: &Path) -> Result<Self, AssetError> {
        let img = image::open(path)
            .map_err(|source| AssetError::Sprite {
                path: path.to_owned(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        let mask = PixelMask::from_alpha(width, height, img.as_raw(), MASK_ALPHA_THRESHOLD);
        Ok(Self {
            size: Vec2::new(width as f32, height as f32),
            mask,
        })
    }
}

/// Every sprite the game uses, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SpriteCatalog {
    pub player: Sprite,
    pub meteor: Sprite,
    pub laser: Sprite,
    pub star: Sprite,
    /// All explosion frames share one size
    pub explosion_size: Vec2,
}

impl SpriteCatalog {
    /// Load the full catalog from `dir` (normally `assets/images`).
    /// Every explosion frame is decoded so a broken animation fails here,
    /// not mid-game.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let player = Sprite::load(&dir.join("player.png"))?;
        let meteor = Sprite::load(&dir.join("meteor.png"))?;
        let laser = Sprite::load(&dir.join("laser.png"))?;
        let star = Sprite::load(&dir.join("star.png"))?;

        let mut explosion_size = Vec2::ZERO;
        for frame in 0..EXPLOSION_FRAME_COUNT {
            let sprite = Sprite::load(&dir.join(format!("explosion/{frame}.png")))?;
            explosion_size = sprite.size;
        }

        log::info!(
            "loaded sprite catalog from {}: player {}x{}, meteor {}x{}",
            dir.display(),
            player.size.x,
            player.size.y,
            meteor.size.x,
            meteor.size.y
        );

        Ok(Self {
            player,
            meteor,
            laser,
            star,
            explosion_size,
        })
    }

    /// Catalog with solid rectangular masks at the shipped sprite sizes.
    /// For tests; no files needed.
    pub fn synthetic() -> Self {
        let make = |w: u32, h: u32| Sprite {
            size: Vec2::new(w as f32, h as f32),
            mask: PixelMask::filled(w, h),
        };
        Self {
            player: make(112, 75),
            meteor: make(101, 84),
            laser: make(9, 54),
            star: make(24, 24),
            explosion_size: Vec2::new(64.0, 64.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_catalog_shapes() {
        let catalog = SpriteCatalog::synthetic();
        assert_eq!(catalog.player.size, Vec2::new(112.0, 75.0));
        assert_eq!(catalog.laser.size, Vec2::new(9.0, 54.0));
        assert_eq!(
            catalog.player.mask.solid_count(),
            112 * 75,
            "synthetic masks are fully solid"
        );
    }

    #[test]
    fn test_load_from_shipped_assets() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/images");
        let catalog = SpriteCatalog::load(&dir).expect("shipped assets load");
        assert!(catalog.player.mask.solid_count() > 0);
        assert!(catalog.meteor.mask.solid_count() > 0);
        // The meteor art is an irregular blob, not a full rectangle
        assert!(
            catalog.meteor.mask.solid_count()
                < (catalog.meteor.size.x * catalog.meteor.size.y) as usize
        );
        assert_eq!(catalog.explosion_size, Vec2::new(64.0, 64.0));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = SpriteCatalog::load(Path::new("/nonexistent")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("player.png"), "got: {msg}");
    }
}
