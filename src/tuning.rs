//! Data-driven game balance
//!
//! Every value defaults to the matching constant in [`crate::consts`]; a JSON
//! document only needs to name the fields it overrides.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// What happens after the player crashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Reset the level in the same tick that detected the crash, then pause
    #[default]
    Immediate,
    /// Freeze on the crash frame until the next start signal
    HoldUntilStart,
}

/// Player physics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub jump_impulse: f32,
    pub gravity: f32,
    pub max_vertical_speed: f32,
    pub horizontal_speed: f32,
    pub rotation_scale: f32,
    pub scale: Vec3,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            jump_impulse: JUMP_IMPULSE,
            gravity: GRAVITY,
            max_vertical_speed: MAX_VERTICAL_SPEED,
            horizontal_speed: HORIZONTAL_SPEED,
            rotation_scale: ROTATION_SCALE,
            scale: Vec3::from_array(PLAYER_SCALE),
        }
    }
}

/// Obstacle window layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamTuning {
    pub max_pairs: usize,
    pub pair_spacing: f32,
    pub first_pair_offset: f32,
    pub pipe_offset: f32,
    pub max_extra_gap: f32,
    pub gap_center_range: f32,
    pub scale: Vec3,
}

impl Default for StreamTuning {
    fn default() -> Self {
        Self {
            max_pairs: MAX_PAIRS,
            pair_spacing: PAIR_SPACING,
            first_pair_offset: FIRST_PAIR_OFFSET,
            pipe_offset: PIPE_OFFSET,
            max_extra_gap: MAX_EXTRA_GAP,
            gap_center_range: GAP_CENTER_RANGE,
            scale: Vec3::from_array(OBSTACLE_SCALE),
        }
    }
}

/// Camera framing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub zoom: f32,
    pub y: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            zoom: CAMERA_ZOOM,
            y: CAMERA_Y,
        }
    }
}

/// Session rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    /// Seed for obstacle generation
    pub seed: u64,
    pub vertical_bound: f32,
    pub restart_policy: RestartPolicy,
    /// Frame deltas above this are clamped before reaching the simulation
    pub max_frame_dt_ms: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            vertical_bound: VERTICAL_BOUND,
            restart_policy: RestartPolicy::Immediate,
            max_frame_dt_ms: MAX_FRAME_DT_MS,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub stream: StreamTuning,
    pub camera: CameraTuning,
    pub session: SessionTuning,
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let p = &self.player;
        non_negative("player.jump_impulse", p.jump_impulse)?;
        non_negative("player.gravity", p.gravity)?;
        positive("player.max_vertical_speed", p.max_vertical_speed)?;
        non_negative("player.horizontal_speed", p.horizontal_speed)?;
        finite("player.rotation_scale", p.rotation_scale)?;
        positive_vec("player.scale", p.scale)?;

        let s = &self.stream;
        // advance() watches window index 2, so at least two pairs must be live
        if s.max_pairs < 2 {
            return Err(TuningError::Invalid {
                field: "stream.max_pairs",
                reason: "must be at least 2",
            });
        }
        positive("stream.pair_spacing", s.pair_spacing)?;
        finite("stream.first_pair_offset", s.first_pair_offset)?;
        finite("stream.pipe_offset", s.pipe_offset)?;
        positive("stream.max_extra_gap", s.max_extra_gap)?;
        positive("stream.gap_center_range", s.gap_center_range)?;
        positive_vec("stream.scale", s.scale)?;

        positive("camera.zoom", self.camera.zoom)?;
        finite("camera.y", self.camera.y)?;

        positive("session.vertical_bound", self.session.vertical_bound)?;
        positive("session.max_frame_dt_ms", self.session.max_frame_dt_ms)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be finite",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must not be negative",
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be positive",
        })
    }
}

fn positive_vec(field: &'static str, value: Vec3) -> Result<(), TuningError> {
    if value.is_finite() && value.cmpgt(Vec3::ZERO).all() {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "all components must be positive",
        })
    }
}
