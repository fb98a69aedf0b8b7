//! Player body physics

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::PlayerTuning;

/// The controllable body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    pub position: Vec3,
    /// Units per millisecond; x is constant drift, y is integrated
    pub velocity: Vec3,
    /// Euler degrees; only z is used, for tilt
    pub rotation: Vec3,
    pub scale: Vec3,
    tuning: PlayerTuning,
}

impl PlayerBody {
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::new(tuning.horizontal_speed, 0.0, 0.0),
            rotation: Vec3::ZERO,
            scale: tuning.scale,
            tuning,
        }
    }

    /// Integrate one tick of `dt_ms` milliseconds
    pub fn update(&mut self, dt_ms: f32, lift: bool) {
        let vy = if lift {
            self.velocity.y + self.tuning.jump_impulse
        } else {
            self.velocity.y - self.tuning.gravity
        };
        let vmax = self.tuning.max_vertical_speed;
        self.velocity.y = vy.clamp(-vmax, vmax);

        self.position.x += self.velocity.x * dt_ms;
        self.position.y += self.velocity.y * dt_ms;

        self.rotation.z = self.velocity.y * self.tuning.rotation_scale;
    }

    /// Back to the level start
    pub fn reset(&mut self) {
        self.position = Vec3::ZERO;
        self.rotation.z = 0.0;
        self.velocity = Vec3::new(self.tuning.horizontal_speed, 0.0, 0.0);
    }

    /// Corners of the bounding box: left-bottom, right-bottom, right-top, left-top
    pub fn collision_box(&self) -> [Vec2; 4] {
        self.bounds().corners()
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position.truncate(), self.scale.truncate())
    }
}
