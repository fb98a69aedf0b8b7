//! Session state machine
//!
//! Paused until a start edge, then each tick integrates the player, tests for
//! a crash, and advances the obstacle window. A crash restarts the level in
//! the same tick (or holds, depending on [`RestartPolicy`]).

use serde::{Deserialize, Serialize};

use super::collision::{self, CrashCause};
use super::obstacle::ObstacleStream;
use super::player::PlayerBody;
use crate::input::InputSnapshot;
use crate::renderer::TextureId;
use crate::tuning::{RestartPolicy, SessionTuning, Tuning};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the start edge; nothing moves
    Paused,
    /// Active play
    Running,
    /// Crashed, waiting for a start edge (only with `RestartPolicy::HoldUntilStart`)
    GameOver,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// `dt` was negative or not finite; nothing changed
    pub skipped: bool,
    /// Session entered Running this tick
    pub started: bool,
    /// Obstacle window recycled a pair
    pub advanced: bool,
    /// The run ended this tick
    pub crash: Option<CrashCause>,
    /// Player and window were reset to the level start
    pub restarted: bool,
}

/// One level: the player, the obstacle window and the rules tying them together
#[derive(Debug, Clone)]
pub struct GameSession {
    pub player: PlayerBody,
    pub obstacles: ObstacleStream,
    phase: SessionPhase,
    tuning: SessionTuning,
    /// Running ticks since creation
    ticks: u64,
    /// Crashes since creation
    crashes: u32,
}

impl GameSession {
    pub fn new(tuning: &Tuning, obstacle_texture: TextureId) -> Self {
        Self {
            player: PlayerBody::new(tuning.player),
            obstacles: ObstacleStream::new(tuning.stream, obstacle_texture, tuning.session.seed),
            phase: SessionPhase::Paused,
            tuning: tuning.session,
            ticks: 0,
            crashes: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn crashes(&self) -> u32 {
        self.crashes
    }

    /// Advance the session by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32, input: &InputSnapshot) -> TickReport {
        let mut report = TickReport::default();

        if !dt_ms.is_finite() || dt_ms < 0.0 {
            log::warn!("Rejected frame with dt={}", dt_ms);
            report.skipped = true;
            return report;
        }

        match self.phase {
            SessionPhase::Running => {}
            SessionPhase::Paused => {
                if !input.start {
                    return report;
                }
                self.phase = SessionPhase::Running;
                report.started = true;
                log::info!("Run started");
            }
            SessionPhase::GameOver => {
                if !input.start {
                    return report;
                }
                self.restart();
                report.restarted = true;
                self.phase = SessionPhase::Running;
                report.started = true;
                log::info!("Run restarted");
            }
        }

        let bound = self.tuning.vertical_bound;
        // A body already outside the bounds fails before it can drift back in
        let crash = if collision::out_of_bounds(self.player.position, bound) {
            Some(CrashCause::OutOfBounds)
        } else {
            self.player.update(dt_ms, input.lift_held);
            self.ticks += 1;
            collision::detect(&self.player, self.obstacles.iter(), bound)
        };

        if let Some(cause) = crash {
            self.crashes += 1;
            report.crash = Some(cause);
            log::info!(
                "Crash ({:?}) at x={:.3} y={:.3}",
                cause,
                self.player.position.x,
                self.player.position.y
            );
            match self.tuning.restart_policy {
                RestartPolicy::Immediate => {
                    self.restart();
                    report.restarted = true;
                }
                RestartPolicy::HoldUntilStart => self.phase = SessionPhase::GameOver,
            }
            return report;
        }

        report.advanced = self.obstacles.advance(self.player.position.x);
        report
    }

    /// Back to the level start, paused
    pub fn restart(&mut self) {
        self.player.reset();
        self.obstacles.restart();
        self.phase = SessionPhase::Paused;
    }

    /// Drop the obstacle window; the session is unusable for play afterwards
    pub fn teardown(&mut self) {
        self.obstacles.clear();
        self.phase = SessionPhase::Paused;
    }
}
