//! Held-key snapshot and the input source seam.

/// Directional keys held this frame. A plain value snapshot: the session
/// loop reads it, never the event mechanism behind it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub forward: bool,
    pub back: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl HeldKeys {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Polled once per frame by the session loop. The game binds this to the
/// raylib keyboard; tests feed scripted sequences.
pub trait InputSource {
    fn poll(&mut self) -> HeldKeys;
}

/// Fixed key sequence, then released keys forever. Test helper, also
/// handy for demo/replay input.
pub struct ScriptedInput {
    frames: Vec<HeldKeys>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<HeldKeys>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> HeldKeys {
        let keys = self.frames.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        keys
    }
}
