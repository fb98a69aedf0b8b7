//! Per-frame polled input
//!
//! The host pushes raw events into [`InputState`] whenever it likes; the game
//! takes one [`InputSnapshot`] per frame, so a tick always sees a consistent
//! view of the controls.

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Other(u32),
}

/// Raw events from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Primary pointer button
    PointerDown,
    PointerUp,
    Resize { width: u32, height: u32 },
}

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Lift control is currently held (level-triggered)
    pub lift_held: bool,
    /// Lift went from released to held since the previous snapshot
    pub start: bool,
}

impl InputSnapshot {
    pub fn lift(held: bool) -> Self {
        Self {
            lift_held: held,
            start: false,
        }
    }

    pub fn start() -> Self {
        Self {
            lift_held: true,
            start: true,
        }
    }
}

/// Accumulates events between snapshots
#[derive(Debug, Clone, Default)]
pub struct InputState {
    key_held: bool,
    pointer_held: bool,
    /// Rising edge seen since the last snapshot
    pending_start: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the state. Returns the new viewport size for resize events.
    pub fn apply(&mut self, event: &InputEvent) -> Option<(u32, u32)> {
        let was_held = self.lift_held();
        match *event {
            InputEvent::KeyDown(Key::Space) => self.key_held = true,
            InputEvent::KeyUp(Key::Space) => self.key_held = false,
            InputEvent::PointerDown => self.pointer_held = true,
            InputEvent::PointerUp => self.pointer_held = false,
            InputEvent::Resize { width, height } => return Some((width, height)),
            InputEvent::KeyDown(Key::Other(_)) | InputEvent::KeyUp(Key::Other(_)) => {}
        }
        if !was_held && self.lift_held() {
            self.pending_start = true;
        }
        None
    }

    pub fn lift_held(&self) -> bool {
        self.key_held || self.pointer_held
    }

    /// Take this frame's snapshot; consumes the pending start edge
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            lift_held: self.lift_held(),
            start: std::mem::take(&mut self.pending_start),
        }
    }

    /// Drop everything (focus loss, teardown)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_fires_once_per_press() {
        let mut input = InputState::new();
        input.apply(&InputEvent::KeyDown(Key::Space));

        let first = input.snapshot();
        assert!(first.start);
        assert!(first.lift_held);

        // Key repeat while held is not a new edge
        input.apply(&InputEvent::KeyDown(Key::Space));
        let second = input.snapshot();
        assert!(!second.start);
        assert!(second.lift_held);
    }

    #[test]
    fn test_tap_between_frames_still_starts() {
        let mut input = InputState::new();
        input.apply(&InputEvent::KeyDown(Key::Space));
        input.apply(&InputEvent::KeyUp(Key::Space));

        let snap = input.snapshot();
        assert!(snap.start);
        assert!(!snap.lift_held);
    }

    #[test]
    fn test_pointer_and_key_share_lift() {
        let mut input = InputState::new();
        input.apply(&InputEvent::PointerDown);
        input.apply(&InputEvent::KeyDown(Key::Space));
        input.apply(&InputEvent::PointerUp);
        assert!(input.lift_held());
        // Only the first press produced an edge
        assert!(input.snapshot().start);
        input.apply(&InputEvent::KeyUp(Key::Space));
        assert!(!input.snapshot().lift_held);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut input = InputState::new();
        input.apply(&InputEvent::KeyDown(Key::Other(13)));
        assert_eq!(input.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn test_resize_passthrough() {
        let mut input = InputState::new();
        assert_eq!(
            input.apply(&InputEvent::Resize {
                width: 640,
                height: 480
            }),
            Some((640, 480))
        );
    }
}
