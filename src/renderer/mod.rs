//! Rendering surface consumed by the game
//!
//! The game never talks to a GPU. It hands a camera, world transforms and
//! texture ids to whatever implements [`Renderer2D`]; a backend owns the real
//! resources behind each [`TextureId`].

pub mod draw_list;
pub mod quad;

pub use draw_list::{DrawList, Frame};
pub use quad::QuadInstance;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Backend-issued texture reference. Copying it does not take ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Capabilities the game needs from a 2D renderer
pub trait Renderer2D {
    /// Start a frame viewed through `camera`, cleared to `clear_color`
    fn begin_frame(&mut self, camera: &Camera, clear_color: [f32; 4]);

    /// Queue a unit quad transformed by `transform`
    fn draw_textured_quad(&mut self, transform: &Mat4, texture: TextureId);

    /// Finish and submit the frame
    fn end_frame(&mut self);

    /// Release a texture the game was handed at level load
    fn release_texture(&mut self, texture: TextureId);
}
