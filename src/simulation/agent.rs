use serde::{Deserialize, Serialize};
use std::fmt;

use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::grid::{Bounds, Cell, Grid, Position};
use crate::simulation::heading::{Heading, Rotation};

/// What a single sensor reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    Line,
    NoLine,
    OutOfBounds,
}

impl Reading {
    #[must_use]
    pub const fn is_line(self) -> bool {
        matches!(self, Self::Line)
    }

    /// Short label for tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::NoLine => "-",
            Self::OutOfBounds => "edge",
        }
    }
}

/// Sensor readings taken once per tick and consumed by the decision step.
///
/// `left`, `center` and `right` are relative to `heading`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Perception {
    /// The cell under the agent. Never `OutOfBounds`.
    pub own: Reading,
    pub left: Reading,
    pub center: Reading,
    pub right: Reading,
    pub wall_contact: bool,
    pub heading: Heading,
}

/// The labelled outcome of one decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveForward,
    RotateLeft,
    RotateRight,
    #[serde(rename = "rotate_180")]
    Rotate180,
}

impl Action {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MoveForward => "move_forward",
            Self::RotateLeft => "rotate_left",
            Self::RotateRight => "rotate_right",
            Self::Rotate180 => "rotate_180",
        }
    }

    /// Quarter turns applied before the forward move.
    #[must_use]
    pub const fn turns(self) -> &'static [Rotation] {
        match self {
            Self::MoveForward => &[],
            Self::RotateLeft => &[Rotation::CounterClockwise],
            Self::RotateRight => &[Rotation::Clockwise],
            Self::Rotate180 => &[Rotation::Clockwise, Rotation::Clockwise],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type Rule = (fn(&Perception) -> bool, Action);

/// Reflex table, evaluated top to bottom. The last rule always matches.
const RULES: [Rule; 5] = [
    (|p| p.own.is_line() || p.center.is_line(), Action::MoveForward),
    (|p| p.left.is_line(), Action::RotateLeft),
    (|p| p.right.is_line(), Action::RotateRight),
    (|p| p.wall_contact, Action::Rotate180),
    (|_| true, Action::MoveForward),
];

/// Picks the action for `perception`: the first rule whose predicate holds.
#[must_use]
pub fn select_action(perception: &Perception) -> Action {
    RULES
        .iter()
        .find(|(applies, _)| applies(perception))
        .map_or(Action::MoveForward, |&(_, action)| action)
}

/// The reactive line follower.
///
/// Holds no memory beyond its pose and the outcome of the last move attempt;
/// every tick is decided from the current perception alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    position: Position,
    heading: Heading,
    wall_contact: bool,
    initial_heading: Heading,
    bounds: Bounds,
}

impl Agent {
    /// Creates an agent at `(x, y)` facing `heading` inside `bounds`.
    ///
    /// `heading` is also the heading restored by [`Agent::teleport`].
    ///
    /// # Errors
    /// [`SimulationError::InvalidPosition`] if `(x, y)` is outside `bounds`.
    pub fn new(x: i32, y: i32, heading: Heading, bounds: Bounds) -> SimulationResult<Self> {
        let mut agent = Self {
            position: Position::default(),
            heading,
            wall_contact: false,
            initial_heading: heading,
            bounds,
        };
        agent.teleport(x, y)?;
        Ok(agent)
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    #[must_use]
    pub const fn wall_contact(&self) -> bool {
        self.wall_contact
    }

    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Reads the cell under the agent and the three cells ahead.
    ///
    /// Left, center and right probe the neighbours at the heading turned by
    /// -1, 0 and +1 quarter turns. Probes past the edge read `OutOfBounds`.
    #[must_use]
    pub fn sense(&self, grid: &Grid) -> Perception {
        let probe = |turn: i32| {
            let cell = self.position.offset(self.heading.turned(turn).offset());
            match grid.get(cell.x, cell.y) {
                Some(Cell::Line) => Reading::Line,
                Some(Cell::Empty) => Reading::NoLine,
                None => Reading::OutOfBounds,
            }
        };

        Perception {
            own: if grid.is_line(self.position.x, self.position.y) {
                Reading::Line
            } else {
                Reading::NoLine
            },
            left: probe(-1),
            center: probe(0),
            right: probe(1),
            wall_contact: self.wall_contact,
            heading: self.heading,
        }
    }

    /// Chooses an action from `perception`, turns as it demands, then
    /// attempts one forward move.
    pub fn decide_and_act(&mut self, perception: &Perception) -> Action {
        let action = select_action(perception);
        for &rotation in action.turns() {
            self.rotate(rotation);
        }
        self.move_forward();
        action
    }

    /// Steps one cell along the heading if that cell is inside the grid.
    ///
    /// A rejected step leaves the position unchanged and sets wall contact;
    /// an accepted one clears it.
    pub fn move_forward(&mut self) {
        let target = self.position.offset(self.heading.offset());
        if self.bounds.contains(target.x, target.y) {
            self.position = target;
            self.wall_contact = false;
        } else {
            self.wall_contact = true;
        }
    }

    pub fn rotate(&mut self, rotation: Rotation) {
        self.heading = self.heading.rotated(rotation);
    }

    /// Moves the agent to `(x, y)`, clearing wall contact and restoring the
    /// initial heading.
    ///
    /// # Errors
    /// [`SimulationError::InvalidPosition`] if `(x, y)` is outside the grid;
    /// the agent is left unchanged.
    pub fn teleport(&mut self, x: i32, y: i32) -> SimulationResult<()> {
        if !self.bounds.contains(x, y) {
            return Err(SimulationError::InvalidPosition {
                x,
                y,
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        self.position = Position::new(x, y);
        self.heading = self.initial_heading;
        self.wall_contact = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perception(own: Reading, left: Reading, center: Reading, right: Reading) -> Perception {
        Perception {
            own,
            left,
            center,
            right,
            wall_contact: false,
            heading: Heading::Up,
        }
    }

    #[test]
    fn test_rule_order() {
        use Reading::{Line, NoLine, OutOfBounds};

        assert_eq!(
            select_action(&perception(Line, Line, NoLine, Line)),
            Action::MoveForward
        );
        assert_eq!(
            select_action(&perception(NoLine, Line, NoLine, Line)),
            Action::RotateLeft
        );
        assert_eq!(
            select_action(&perception(NoLine, OutOfBounds, NoLine, Line)),
            Action::RotateRight
        );

        let mut blocked = perception(NoLine, NoLine, OutOfBounds, NoLine);
        assert_eq!(select_action(&blocked), Action::MoveForward);
        blocked.wall_contact = true;
        assert_eq!(select_action(&blocked), Action::Rotate180);

        // A visible line outranks the wall
        blocked.right = Line;
        assert_eq!(select_action(&blocked), Action::RotateRight);
    }

    #[test]
    fn test_action_labels_match_serde_names() {
        for action in [
            Action::MoveForward,
            Action::RotateLeft,
            Action::RotateRight,
            Action::Rotate180,
        ] {
            let toml_value = toml::Value::try_from(action).unwrap();
            assert_eq!(toml_value.as_str(), Some(action.label()));
        }
    }
}
