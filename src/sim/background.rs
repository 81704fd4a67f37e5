//! Parallax scenery
//!
//! Clouds and hills scroll slower than the obstacles. They have their own RNG
//! so the scenery never shifts gameplay randomness.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::sample;
use crate::Viewport;

/// Elements per layer
pub const LAYER_COUNT: usize = 5;
/// Scroll factors relative to the game speed
pub const CLOUD_PARALLAX: f32 = 0.5;
pub const HILL_PARALLAX: f32 = 0.2;

/// Stream offset separating scenery randomness from the gameplay RNG
const SCENERY_STREAM: u64 = 0x5CE7_E000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorKind {
    Cloud,
    Hill,
}

/// A decorative rectangle (top-left corner and size)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoration {
    pub kind: DecorKind,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone)]
pub struct Background {
    pub clouds: Vec<Decoration>,
    pub hills: Vec<Decoration>,
    rng: Pcg32,
}

impl Background {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mut background = Self {
            clouds: Vec::with_capacity(LAYER_COUNT),
            hills: Vec::with_capacity(LAYER_COUNT),
            rng: Pcg32::seed_from_u64(seed ^ SCENERY_STREAM),
        };
        background.regenerate(viewport);
        background
    }

    /// Throw away both layers and scatter new ones across the viewport
    pub fn regenerate(&mut self, viewport: Viewport) {
        self.clouds.clear();
        self.hills.clear();
        for _ in 0..LAYER_COUNT {
            let x = self.rng.random_range(0.0..viewport.width * 1.5);
            let cloud = self.cloud(x, viewport);
            self.clouds.push(cloud);

            let x = self.rng.random_range(0.0..viewport.width * 1.5);
            let hill = self.hill(x, viewport);
            self.hills.push(hill);
        }
    }

    /// Scroll both layers, recycling anything that left the screen
    pub fn scroll(&mut self, speed: f32, viewport: Viewport) {
        for i in 0..self.clouds.len() {
            self.clouds[i].pos.x -= speed * CLOUD_PARALLAX;
            if self.clouds[i].pos.x < -self.clouds[i].size.x * 1.5 {
                self.clouds[i] = self.cloud(viewport.width, viewport);
            }
        }
        for i in 0..self.hills.len() {
            self.hills[i].pos.x -= speed * HILL_PARALLAX;
            if self.hills[i].pos.x < -self.hills[i].size.x {
                self.hills[i] = self.hill(viewport.width, viewport);
            }
        }
    }

    fn cloud(&mut self, x: f32, viewport: Viewport) -> Decoration {
        let w = sample(&mut self.rng, 60.0, 120.0);
        let h = sample(&mut self.rng, 20.0, 40.0);
        let y = sample(&mut self.rng, viewport.height * 0.1, viewport.height * 0.4);
        Decoration {
            kind: DecorKind::Cloud,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    fn hill(&mut self, x: f32, viewport: Viewport) -> Decoration {
        let ground_y = viewport.ground_y();
        let w = sample(&mut self.rng, 150.0, 400.0);
        let h = sample(&mut self.rng, 50.0, ground_y * 0.5);
        Decoration {
            kind: DecorKind::Hill,
            pos: Vec2::new(x, ground_y - h),
            size: Vec2::new(w, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_fill_viewport() {
        let viewport = Viewport::new(800.0, 600.0);
        let bg = Background::new(11, viewport);
        assert_eq!(bg.clouds.len(), LAYER_COUNT);
        assert_eq!(bg.hills.len(), LAYER_COUNT);
        for hill in &bg.hills {
            assert!((hill.pos.y + hill.size.y - viewport.ground_y()).abs() < 1e-3);
        }
        for cloud in &bg.clouds {
            assert!(cloud.pos.y >= 60.0 && cloud.pos.y < 240.0);
        }
    }

    #[test]
    fn test_scroll_recycles_to_right_edge() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut bg = Background::new(11, viewport);
        bg.clouds[0].pos.x = -1000.0;
        bg.hills[0].pos.x = -1000.0;
        bg.scroll(4.0, viewport);
        assert_eq!(bg.clouds[0].pos.x, 800.0);
        assert_eq!(bg.hills[0].pos.x, 800.0);
    }

    #[test]
    fn test_parallax_rates() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut bg = Background::new(11, viewport);
        bg.clouds[0].pos.x = 400.0;
        bg.hills[0].pos.x = 400.0;
        bg.scroll(10.0, viewport);
        assert!((bg.clouds[0].pos.x - 395.0).abs() < 1e-4);
        assert!((bg.hills[0].pos.x - 398.0).abs() < 1e-4);
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let bg = Background::new(3, Viewport::new(1.0, 1.0));
        assert_eq!(bg.hills.len(), LAYER_COUNT);
    }
}
