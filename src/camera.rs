//! Orthographic camera and follow behaviour
//!
//! The camera is never authoritative: its position is recomputed from the
//! player each frame and its extents from the viewport on resize.

use glam::{Mat4, Vec3};

use crate::tuning::CameraTuning;

/// Orthographic 2D camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub zoom: f32,
    /// Projection extents (left, right, bottom, top) relative to the position
    pub extents: [f32; 4],
}

impl Camera {
    pub fn new(width: u32, height: u32, tuning: &CameraTuning) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, tuning.y, 0.0),
            zoom: tuning.zoom,
            extents: [-tuning.zoom, tuning.zoom, -tuning.zoom, tuning.zoom],
        };
        camera.resize(width, height);
        camera
    }

    /// Recompute extents from the viewport aspect ratio. Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return false;
        }
        let aspect = width as f32 / height as f32;
        self.extents = [
            -aspect * self.zoom,
            aspect * self.zoom,
            -self.zoom,
            self.zoom,
        ];
        true
    }

    pub fn aspect_ratio(&self) -> f32 {
        (self.extents[1] - self.extents[0]) / (self.extents[3] - self.extents[2])
    }

    pub fn projection(&self) -> Mat4 {
        let [left, right, bottom, top] = self.extents;
        Mat4::orthographic_rh(left, right, bottom, top, -1.0, 1.0)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// How the camera tracks a target
pub trait FollowStrategy {
    fn follow(&self, camera: &mut Camera, target: Vec3);
}

/// Snap horizontally onto the target; height and zoom stay put
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapHorizontal;

impl FollowStrategy for SnapHorizontal {
    fn follow(&self, camera: &mut Camera, target: Vec3) {
        camera.position.x = target.x;
    }
}

/// Camera plus the strategy that moves it
pub struct CameraFollow {
    camera: Camera,
    strategy: Box<dyn FollowStrategy>,
}

impl CameraFollow {
    pub fn new(camera: Camera, strategy: Box<dyn FollowStrategy>) -> Self {
        Self { camera, strategy }
    }

    /// Hard-snapping player follow
    pub fn snapping(camera: Camera) -> Self {
        Self::new(camera, Box::new(SnapHorizontal))
    }

    pub fn update(&mut self, target: Vec3) {
        self.strategy.follow(&mut self.camera, target);
    }

    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.camera.resize(width, height)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}
