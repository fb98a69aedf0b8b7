//! Recording renderer
//!
//! Collects each frame into a list of [`QuadInstance`]s. Used by the headless
//! binary, by tests, and as the staging buffer for a GPU backend.

use glam::Mat4;

use super::{QuadInstance, Renderer2D, TextureId};
use crate::camera::Camera;

/// One finished frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub view_projection: Mat4,
    pub clear_color: [f32; 4],
    pub quads: Vec<QuadInstance>,
}

/// A [`Renderer2D`] that records instead of drawing
#[derive(Debug, Default)]
pub struct DrawList {
    current: Option<Frame>,
    last: Option<Frame>,
    frames_submitted: u64,
    released: Vec<TextureId>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently submitted frame
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    /// Textures released so far, in release order
    pub fn released(&self) -> &[TextureId] {
        &self.released
    }
}

impl Renderer2D for DrawList {
    fn begin_frame(&mut self, camera: &Camera, clear_color: [f32; 4]) {
        if self.current.is_some() {
            log::warn!("begin_frame called twice; dropping unfinished frame");
        }
        // Reuse the previous allocation
        let mut quads = self.last.take().map(|f| f.quads).unwrap_or_default();
        quads.clear();
        self.current = Some(Frame {
            view_projection: camera.view_projection(),
            clear_color,
            quads,
        });
    }

    fn draw_textured_quad(&mut self, transform: &Mat4, texture: TextureId) {
        match self.current.as_mut() {
            Some(frame) => frame.quads.push(QuadInstance::new(transform, texture)),
            None => log::warn!("draw outside of a frame ignored"),
        }
    }

    fn end_frame(&mut self) {
        if let Some(frame) = self.current.take() {
            self.last = Some(frame);
            self.frames_submitted += 1;
        }
    }

    fn release_texture(&mut self, texture: TextureId) {
        self.released.push(texture);
    }
}
