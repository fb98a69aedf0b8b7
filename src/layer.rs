//! The game layer handed to the host engine
//!
//! The host owns the loop: it forwards events to [`Layer::handle_input`],
//! calls [`Layer::update`] once per frame with the elapsed milliseconds, then
//! [`Layer::render`] with its renderer.

use crate::camera::{Camera, CameraFollow};
use crate::consts::CLEAR_COLOR;
use crate::input::{InputEvent, InputState};
use crate::renderer::{Renderer2D, TextureId};
use crate::sim::{GameSession, TickReport};
use crate::tuning::Tuning;
use crate::world_transform;

/// Capabilities the host drives every frame
pub trait Layer {
    fn update(&mut self, dt_ms: f32);
    fn handle_input(&mut self, event: &InputEvent);
    fn render(&mut self, renderer: &mut dyn Renderer2D);
}

/// Textures acquired by the host at level load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTextures {
    pub player: TextureId,
    pub obstacle: TextureId,
}

/// Session, camera and input wired together
pub struct GameLayer {
    session: GameSession,
    camera: CameraFollow,
    input: InputState,
    /// `None` once released
    textures: Option<LevelTextures>,
    max_frame_dt_ms: f32,
    last_report: TickReport,
}

impl GameLayer {
    pub fn new(tuning: &Tuning, textures: LevelTextures, width: u32, height: u32) -> Self {
        let session = GameSession::new(tuning, textures.obstacle);
        let mut camera = CameraFollow::snapping(Camera::new(width, height, &tuning.camera));
        camera.update(session.player.position);
        log::info!(
            "Level loaded: {} obstacle pairs, seed {:#x}",
            session.obstacles.max_pairs(),
            tuning.session.seed
        );
        Self {
            session,
            camera,
            input: InputState::new(),
            textures: Some(textures),
            max_frame_dt_ms: tuning.session.max_frame_dt_ms,
            last_report: TickReport::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn camera(&self) -> &Camera {
        self.camera.camera()
    }

    /// Report from the most recent update
    pub fn last_report(&self) -> TickReport {
        self.last_report
    }

    pub fn is_torn_down(&self) -> bool {
        self.textures.is_none()
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        if self.camera.resize(width, height) {
            log::debug!("Viewport resized to {}x{}", width, height);
        }
    }

    /// Release level textures and drop the obstacle window. Safe to call twice.
    pub fn teardown(&mut self, renderer: &mut dyn Renderer2D) {
        let Some(textures) = self.textures.take() else {
            return;
        };
        self.session.teardown();
        self.input.clear();
        renderer.release_texture(textures.obstacle);
        renderer.release_texture(textures.player);
        log::info!("Level torn down after {} crashes", self.session.crashes());
    }
}

impl Layer for GameLayer {
    fn update(&mut self, dt_ms: f32) {
        if self.is_torn_down() {
            return;
        }
        // Non-finite and negative deltas pass through; the session rejects them
        let dt_ms = if dt_ms.is_finite() && dt_ms > self.max_frame_dt_ms {
            self.max_frame_dt_ms
        } else {
            dt_ms
        };
        let snapshot = self.input.snapshot();
        self.last_report = self.session.tick(dt_ms, &snapshot);
        // Follow after the tick so a same-tick restart is reflected before render
        self.camera.update(self.session.player.position);
    }

    fn handle_input(&mut self, event: &InputEvent) {
        if let Some((width, height)) = self.input.apply(event) {
            self.handle_resize(width, height);
        }
    }

    fn render(&mut self, renderer: &mut dyn Renderer2D) {
        let Some(textures) = self.textures else {
            return;
        };
        renderer.begin_frame(self.camera.camera(), CLEAR_COLOR);
        for obstacle in self.session.obstacles.iter() {
            renderer.draw_textured_quad(&obstacle.transform(), obstacle.texture);
        }
        let player = &self.session.player;
        renderer.draw_textured_quad(
            &world_transform(player.position, player.rotation, player.scale),
            textures.player,
        );
        renderer.end_frame();
    }
}
