//! Collision detection
//!
//! Everything here is a pure function of positions and scales: axis-aligned
//! box overlap against the obstacles, plus the vertical play bounds.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::player::PlayerBody;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Rect {
    pub fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Box of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    /// Left-bottom, right-bottom, right-top, left-top
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left, self.bottom),
            Vec2::new(self.right, self.bottom),
            Vec2::new(self.right, self.top),
            Vec2::new(self.left, self.top),
        ]
    }

    /// Inclusive overlap: shared edges count as contact
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.bottom <= other.top
            && self.top >= other.bottom
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Left the vertical play area
    OutOfBounds,
    /// Hit the obstacle at this window index
    Obstacle { index: usize },
}

/// True once the body is strictly beyond `bound` vertically
#[inline]
pub fn out_of_bounds(position: Vec3, bound: f32) -> bool {
    position.y.abs() > bound
}

/// Full per-tick test: bounds first, then the first overlapping obstacle
pub fn detect<'a>(
    player: &PlayerBody,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    bound: f32,
) -> Option<CrashCause> {
    if out_of_bounds(player.position, bound) {
        return Some(CrashCause::OutOfBounds);
    }

    let body = player.bounds();
    obstacles
        .into_iter()
        .position(|obstacle| body.overlaps(&obstacle.bounds()))
        .map(|index| CrashCause::Obstacle { index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::TextureId;
    use crate::sim::obstacle::ObstacleKind;
    use crate::tuning::PlayerTuning;
    use proptest::prelude::*;

    fn pipe(x: f32, y: f32) -> Obstacle {
        Obstacle::new(
            ObstacleKind::Bottom,
            Vec3::new(x, y, 0.0),
            Vec3::new(0.1, 1.0, 1.0),
            TextureId(0),
        )
    }

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(a.overlaps(&Rect::new(0.5, 0.5, 1.5, 1.5)));
        assert!(!a.overlaps(&Rect::new(1.5, 0.0, 2.0, 1.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 1.5, 1.0, 2.0)));
    }

    #[test]
    fn test_touching_edges_collide() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(a.overlaps(&Rect::new(1.0, 0.0, 2.0, 1.0)));
        assert!(a.overlaps(&Rect::new(1.0, 1.0, 2.0, 2.0)));
    }

    #[test]
    fn test_containment_collides() {
        let outer = Rect::new(-1.0, -1.0, 1.0, 1.0);
        let inner = Rect::new(-0.1, -0.1, 0.1, 0.1);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_bounds_are_strict() {
        assert!(!out_of_bounds(Vec3::new(0.0, 1.0, 0.0), 1.0));
        assert!(!out_of_bounds(Vec3::new(0.0, -1.0, 0.0), 1.0));
        assert!(out_of_bounds(Vec3::new(0.0, 1.01, 0.0), 1.0));
        assert!(out_of_bounds(Vec3::new(0.0, -1.01, 0.0), 1.0));
    }

    #[test]
    fn test_detect_out_of_bounds_wins() {
        let mut player = PlayerBody::new(PlayerTuning::default());
        player.position.y = 1.2;
        // Obstacle sits right on the player too; bounds are reported first
        let obstacles = [pipe(0.0, 1.2)];
        assert_eq!(detect(&player, &obstacles, 1.0), Some(CrashCause::OutOfBounds));
    }

    #[test]
    fn test_detect_obstacle_index() {
        let player = PlayerBody::new(PlayerTuning::default());
        let obstacles = [pipe(1.5, -0.7), pipe(0.02, 0.5), pipe(0.0, -0.3)];
        assert_eq!(
            detect(&player, &obstacles, 1.0),
            Some(CrashCause::Obstacle { index: 1 })
        );
    }

    #[test]
    fn test_detect_clear() {
        let player = PlayerBody::new(PlayerTuning::default());
        let obstacles = [pipe(1.5, -0.7), pipe(1.5, 0.7)];
        assert_eq!(detect(&player, &obstacles, 1.0), None);
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-5.0f32..5.0, -5.0f32..5.0, 0.0f32..3.0, 0.0f32..3.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(a in rect(), b in rect()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_rect_overlaps_itself(a in rect()) {
            prop_assert!(a.overlaps(&a));
        }
    }
}
