//! Action for Pong.
use volley_core::Act;

/// Action for Pong, an index into the action set of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PongAct {
    /// Index of the action.
    pub act: u8,
}

impl PongAct {
    /// Does nothing.
    pub const NOOP: Self = Self { act: 0 };

    /// Moves the paddle up.
    pub const UP: Self = Self { act: 2 };

    /// Moves the paddle down.
    pub const DOWN: Self = Self { act: 3 };

    /// Constructs an action from its index.
    pub fn new(act: u8) -> Self {
        Self { act }
    }
}

impl Act for PongAct {
    fn noop() -> Self {
        Self::NOOP
    }
}

impl From<u8> for PongAct {
    fn from(act: u8) -> Self {
        Self { act }
    }
}
