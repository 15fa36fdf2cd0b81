//! Spin classification and input movement definitions.

use serde::{Deserialize, Serialize};

/// Spin attached to a placement. Ordered so `max` keeps the strongest.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum SpinType {
    #[default]
    None,
    Mini,
    Normal,
}

impl SpinType {
    pub fn is_spin(self) -> bool {
        self != SpinType::None
    }
}

/// Rotation direction. Left is counter-clockwise.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    pub const BOTH: [TurnDirection; 2] = [TurnDirection::Left, TurnDirection::Right];

    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A single player input applied to the active piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Movement {
    Left,
    Right,
    RotateClockwise,
    RotateCounterClockwise,
    SoftDrop,
    SonicDrop,
}
