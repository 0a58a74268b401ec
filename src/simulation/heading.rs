//! Cardinal headings and quarter-turn rotations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four cardinal orientations, cyclically ordered clockwise.
///
/// The grid's y axis grows downward, so `Up` moves toward row 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

/// Direction of a single quarter turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    CounterClockwise,
    Clockwise,
}

impl Rotation {
    /// Signed step applied to a heading index.
    #[must_use]
    pub const fn step(self) -> i32 {
        match self {
            Self::CounterClockwise => -1,
            Self::Clockwise => 1,
        }
    }
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    /// Index in the cyclic order (`Up` = 0 .. `Left` = 3).
    #[must_use]
    pub const fn index(self) -> i32 {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Heading at `index`, wrapped modulo 4.
    #[must_use]
    pub const fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(4) as usize]
    }

    /// Heading offset by `steps` quarter turns (positive is clockwise).
    #[must_use]
    pub const fn turned(self, steps: i32) -> Self {
        Self::from_index(self.index() + steps)
    }

    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Self {
        self.turned(rotation.step())
    }

    /// Unit displacement `(dx, dy)` of one step along this heading.
    ///
    /// Both the forward sensor and `move_forward` go through this, so the
    /// center probe is always the cell the agent would move into.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Arrow glyph for dashboards.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Up => '▲',
            Self::Right => '►',
            Self::Down => '▼',
            Self::Left => '◄',
        }
    }

    /// ASCII arrow used inside the rasterised field.
    #[must_use]
    pub const fn ascii(self) -> char {
        match self {
            Self::Up => '^',
            Self::Right => '>',
            Self::Down => 'v',
            Self::Left => '<',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}
