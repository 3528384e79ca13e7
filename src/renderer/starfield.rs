//! Parallax starfield background

use glam::Vec2;
use rand::Rng;

use super::draw::{DrawCommand, colors};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, TARGET_FPS};

pub const STAR_COUNT: usize = 160;

/// Depth layer; nearer stars are larger, brighter and faster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarLayer {
    Far,
    Mid,
    Near,
}

impl StarLayer {
    pub const ALL: [StarLayer; 3] = [StarLayer::Far, StarLayer::Mid, StarLayer::Near];

    /// Downward drift per 60 Hz frame
    pub fn speed(self) -> f32 {
        match self {
            StarLayer::Far => 0.3,
            StarLayer::Mid => 0.6,
            StarLayer::Near => 1.0,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            StarLayer::Far => 1.0,
            StarLayer::Mid => 2.0,
            StarLayer::Near => 3.0,
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            StarLayer::Far => colors::STAR_FAR,
            StarLayer::Mid => colors::STAR_MID,
            StarLayer::Near => colors::STAR_NEAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub layer: StarLayer,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new<R: Rng>(rng: &mut R, count: usize) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..=FIELD_WIDTH),
                    rng.random_range(0.0..=FIELD_HEIGHT),
                ),
                layer: StarLayer::ALL[rng.random_range(0..StarLayer::ALL.len())],
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Drift every star down; stars leaving the bottom re-enter at the top
    /// at a fresh column.
    pub fn update<R: Rng>(&mut self, rng: &mut R, dt_ms: f32) {
        let frames = dt_ms * TARGET_FPS as f32 / 1000.0;
        for star in &mut self.stars {
            star.pos.y += star.layer.speed() * frames;
            if star.pos.y > FIELD_HEIGHT {
                star.pos.y = 0.0;
                star.pos.x = rng.random_range(0.0..=FIELD_WIDTH);
            }
        }
    }

    pub fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.extend(
            self.stars
                .iter()
                .map(|s| DrawCommand::circle(s.pos, s.layer.radius(), s.layer.color())),
        );
    }
}
