//! Pipe Runner - endless side-scrolling pipe dodging game core
//!
//! Core modules:
//! - `sim`: Simulation (player physics, obstacle window, collisions, session state)
//! - `camera`: Orthographic camera and follow strategies
//! - `input`: Per-frame polled input snapshot
//! - `renderer`: Renderer capability surface and recorded draw list
//! - `layer`: The game layer exposed to the host engine
//! - `tuning`: Data-driven game balance

pub mod camera;
pub mod input;
pub mod layer;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use camera::{Camera, CameraFollow, FollowStrategy, SnapHorizontal};
pub use input::{InputEvent, InputSnapshot, InputState, Key};
pub use layer::{GameLayer, Layer, LevelTextures};
pub use renderer::{DrawList, QuadInstance, Renderer2D, TextureId};
pub use tuning::{RestartPolicy, Tuning, TuningError};

use glam::{Mat4, Quat, Vec3};

/// Game configuration constants
pub mod consts {
    /// Upward velocity added per tick while lift is held
    pub const JUMP_IMPULSE: f32 = 0.000_05;
    /// Downward velocity added per tick while lift is released
    pub const GRAVITY: f32 = 0.000_04;
    /// Vertical speed bound (units per millisecond)
    pub const MAX_VERTICAL_SPEED: f32 = 0.002;
    /// Constant rightward drift (units per millisecond)
    pub const HORIZONTAL_SPEED: f32 = 0.000_7;
    /// Degrees of tilt per unit of vertical speed
    pub const ROTATION_SCALE: f32 = 40_000.0;
    /// Player quad size
    pub const PLAYER_SCALE: [f32; 3] = [0.1, 0.1, 1.0];

    /// Pairs kept alive in the obstacle window
    pub const MAX_PAIRS: usize = 4;
    /// Horizontal distance between consecutive pairs
    pub const PAIR_SPACING: f32 = 1.1;
    /// X of the first pair after a restart
    pub const FIRST_PAIR_OFFSET: f32 = 1.5;
    /// Distance from the gap center to each pipe center (before gap widening)
    pub const PIPE_OFFSET: f32 = 0.6;
    /// Extra gap widening is drawn from [0, MAX_EXTRA_GAP)
    pub const MAX_EXTRA_GAP: f32 = 0.2;
    /// Gap center is drawn from [-GAP_CENTER_RANGE, GAP_CENTER_RANGE)
    pub const GAP_CENTER_RANGE: f32 = 0.25;
    /// Obstacle quad size
    pub const OBSTACLE_SCALE: [f32; 3] = [0.1, 1.0, 1.0];

    /// Player fails once |y| exceeds this
    pub const VERTICAL_BOUND: f32 = 1.0;

    /// Orthographic zoom (half-height of the view in world units)
    pub const CAMERA_ZOOM: f32 = 1.0;
    /// Fixed camera height
    pub const CAMERA_Y: f32 = 0.0;

    /// Largest frame delta fed to the simulation (milliseconds)
    pub const MAX_FRAME_DT_MS: f32 = 100.0;

    /// Background clear color
    pub const CLEAR_COLOR: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
}

/// World matrix for a quad: scale, then rotate about z (degrees), then translate
#[inline]
pub fn world_transform(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        scale,
        Quat::from_rotation_z(rotation.z.to_radians()),
        position,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_transform_flips_top_pipe() {
        let m = world_transform(Vec3::new(1.0, 2.0, 0.0), Vec3::new(0.0, 0.0, 180.0), Vec3::ONE);
        let p = m.transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 1.5).abs() < 1e-5);
    }
}
