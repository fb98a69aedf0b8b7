//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders or touches
//! the platform:
//! - Time arrives as a millisecond `dt` per tick
//! - Obstacle generation uses a seeded RNG
//! - Input arrives as a per-tick snapshot

pub mod collision;
pub mod obstacle;
pub mod player;
pub mod session;

pub use collision::{CrashCause, Rect, detect, out_of_bounds};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleStream};
pub use player::PlayerBody;
pub use session::{GameSession, SessionPhase, TickReport};
