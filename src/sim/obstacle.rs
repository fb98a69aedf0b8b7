//! Obstacle pairs and the sliding obstacle window
//!
//! The window is a ring over a preallocated `Vec`: advancing overwrites the
//! oldest pair in place and moves the head, so the logical order (oldest
//! first, strictly increasing x by pair) is kept without shifting elements.

use glam::{Mat4, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::renderer::TextureId;
use crate::tuning::StreamTuning;
use crate::world_transform;

/// Which half of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Rises from below, upright
    Bottom,
    /// Hangs from above, rotated 180°
    Top,
}

impl ObstacleKind {
    /// Rotation about z, in degrees
    pub fn rotation_degrees(self) -> f32 {
        match self {
            ObstacleKind::Bottom => 0.0,
            ObstacleKind::Top => 180.0,
        }
    }
}

/// A single pipe. Pipes are replaced, never moved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Borrowed from the level; the level releases it
    pub texture: TextureId,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, position: Vec3, scale: Vec3, texture: TextureId) -> Self {
        Self {
            kind,
            position,
            rotation: Vec3::new(0.0, 0.0, kind.rotation_degrees()),
            scale,
            texture,
        }
    }

    /// Rotation does not affect the box; a 180° flip maps it onto itself
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position.truncate(), self.scale.truncate())
    }

    pub fn transform(&self) -> Mat4 {
        world_transform(self.position, self.rotation, self.scale)
    }
}

/// Fixed-size window of obstacle pairs ahead of the player
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    slots: Vec<Obstacle>,
    /// Slot of the oldest pair's bottom obstacle (always even)
    head: usize,
    tuning: StreamTuning,
    texture: TextureId,
    rng: Pcg32,
    /// Threshold x that most recently triggered an advance
    last_trigger: Option<f32>,
}

impl ObstacleStream {
    pub fn new(tuning: StreamTuning, texture: TextureId, seed: u64) -> Self {
        let mut stream = Self {
            slots: Vec::with_capacity(tuning.max_pairs * 2),
            head: 0,
            tuning,
            texture,
            rng: Pcg32::seed_from_u64(seed),
            last_trigger: None,
        };
        stream.restart();
        stream
    }

    /// Refill the window with the starting layout
    pub fn restart(&mut self) {
        self.slots.clear();
        self.head = 0;
        self.last_trigger = None;
        for i in 0..self.tuning.max_pairs {
            let offset = i as f32 * self.tuning.pair_spacing + self.tuning.first_pair_offset;
            let [bottom, top] = self.create_pair(offset);
            self.slots.push(bottom);
            self.slots.push(top);
        }
    }

    /// Drop every obstacle (level teardown)
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
        self.last_trigger = None;
    }

    /// Roll a new pair at `offset_x`: bottom first, then top
    pub fn create_pair(&mut self, offset_x: f32) -> [Obstacle; 2] {
        let gap = self.rng.random_range(0.0..self.tuning.max_extra_gap);
        let range = self.tuning.gap_center_range;
        let center = self.rng.random_range(-range..range);
        let reach = self.tuning.pipe_offset + gap;

        [
            Obstacle::new(
                ObstacleKind::Bottom,
                Vec3::new(offset_x, center - reach, 0.0),
                self.tuning.scale,
                self.texture,
            ),
            Obstacle::new(
                ObstacleKind::Top,
                Vec3::new(offset_x, center + reach, 0.0),
                self.tuning.scale,
                self.texture,
            ),
        ]
    }

    /// X the player must pass to trigger an advance: the second pair's bottom pipe
    pub fn threshold_x(&self) -> Option<f32> {
        self.get(2).map(|o| o.position.x)
    }

    /// Recycle the oldest pair once `player_x` passes the threshold.
    /// Returns true if the window moved. A threshold fires at most once.
    pub fn advance(&mut self, player_x: f32) -> bool {
        let Some(threshold) = self.threshold_x() else {
            return false;
        };
        if player_x <= threshold || self.last_trigger == Some(threshold) {
            return false;
        }
        self.last_trigger = Some(threshold);

        let next_x = match self.last() {
            Some(last) => last.position.x + self.tuning.pair_spacing,
            None => return false,
        };
        let [bottom, top] = self.create_pair(next_x);
        let len = self.slots.len();
        self.slots[self.head] = bottom;
        self.slots[self.head + 1] = top;
        self.head = (self.head + 2) % len;

        log::debug!(
            "Obstacle window advanced at x={:.3}, new pair at x={:.3}",
            threshold,
            next_x
        );
        true
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Obstacle at logical index (0 = oldest)
    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        let len = self.slots.len();
        if index >= len {
            return None;
        }
        self.slots.get((self.head + index) % len)
    }

    pub fn last(&self) -> Option<&Obstacle> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Obstacles in logical order
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    /// Pairs in logical order
    pub fn pairs(&self) -> impl Iterator<Item = (&Obstacle, &Obstacle)> + '_ {
        let mut iter = self.iter();
        std::iter::from_fn(move || Some((iter.next()?, iter.next()?)))
    }

    pub fn max_pairs(&self) -> usize {
        self.tuning.max_pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stream(seed: u64) -> ObstacleStream {
        ObstacleStream::new(StreamTuning::default(), TextureId(7), seed)
    }

    fn assert_ordered(stream: &ObstacleStream) {
        let xs: Vec<f32> = stream.pairs().map(|(b, _)| b.position.x).collect();
        assert_eq!(xs.len(), stream.max_pairs());
        for w in xs.windows(2) {
            assert!(w[0] < w[1], "pairs out of order: {:?}", xs);
        }
        for (bottom, top) in stream.pairs() {
            assert_eq!(bottom.kind, ObstacleKind::Bottom);
            assert_eq!(top.kind, ObstacleKind::Top);
            assert_eq!(bottom.position.x, top.position.x);
        }
    }

    #[test]
    fn test_restart_layout() {
        let stream = stream(1);
        assert_eq!(stream.len(), 8);
        for (i, (bottom, _)) in stream.pairs().enumerate() {
            let expected = i as f32 * 1.1 + 1.5;
            assert!((bottom.position.x - expected).abs() < 1e-6);
        }
        assert_ordered(&stream);
    }

    #[test]
    fn test_pair_geometry() {
        let mut stream = stream(42);
        for _ in 0..100 {
            let [bottom, top] = stream.create_pair(3.0);
            let center = (bottom.position.y + top.position.y) / 2.0;
            let gap = (top.position.y - bottom.position.y) / 2.0 - 0.6;
            assert!((-0.25..0.25).contains(&center) || (center + 0.25).abs() < 1e-5);
            assert!(gap > -1e-5 && gap < 0.2 + 1e-5);
            assert_eq!(bottom.rotation.z, 0.0);
            assert_eq!(top.rotation.z, 180.0);
            assert_eq!(bottom.scale, Vec3::new(0.1, 1.0, 1.0));
            assert_eq!(top.texture, TextureId(7));
        }
    }

    #[test]
    fn test_advance_recycles_oldest_pair() {
        let mut stream = stream(3);
        let second = stream.get(2).copied().unwrap();
        let last_x = stream.last().unwrap().position.x;

        assert!(!stream.advance(second.position.x));
        assert!(stream.advance(second.position.x + 0.01));

        assert_eq!(stream.len(), 8);
        assert_eq!(stream.get(0), Some(&second));
        let new_last = stream.last().unwrap().position.x;
        assert!((new_last - (last_x + 1.1)).abs() < 1e-5);
        assert_ordered(&stream);
    }

    #[test]
    fn test_advance_fires_once_per_crossing() {
        let mut stream = stream(4);
        let x = stream.threshold_x().unwrap() + 0.001;
        assert!(stream.advance(x));
        // Same x, next tick: the new threshold is a whole pair spacing ahead
        assert!(!stream.advance(x));
        assert!(!stream.advance(x));
    }

    #[test]
    fn test_wraps_around_ring() {
        let mut stream = stream(5);
        for _ in 0..11 {
            let x = stream.threshold_x().unwrap() + 0.001;
            assert!(stream.advance(x));
            assert_ordered(&stream);
        }
        let first = stream.get(0).unwrap().position.x;
        assert!((first - (11.0 * 1.1 + 1.5)).abs() < 1e-4);
    }

    #[test]
    fn test_restart_after_advances() {
        let mut stream = stream(6);
        for _ in 0..3 {
            let x = stream.threshold_x().unwrap() + 0.001;
            stream.advance(x);
        }
        stream.restart();
        assert!((stream.get(0).unwrap().position.x - 1.5).abs() < 1e-6);
        assert_ordered(&stream);
    }

    #[test]
    fn test_clear_empties_window() {
        let mut stream = stream(8);
        stream.clear();
        assert!(stream.is_empty());
        assert_eq!(stream.threshold_x(), None);
        assert!(!stream.advance(100.0));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a: Vec<Obstacle> = stream(99).iter().copied().collect();
        let b: Vec<Obstacle> = stream(99).iter().copied().collect();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_advance_keeps_count(seed in any::<u64>(), steps in prop::collection::vec(0.0f32..3.0, 1..40)) {
            let mut stream = stream(seed);
            let mut x = 0.0;
            for step in steps {
                x += step;
                stream.advance(x);
                prop_assert_eq!(stream.len(), 8);
            }
            assert_ordered(&stream);
        }
    }
}
