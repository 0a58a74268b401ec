pub mod agent;
pub mod error;
pub mod generator;
pub mod grid;
pub mod heading;
pub mod params;
pub mod step_log;
pub mod world;

pub use agent::{select_action, Action, Agent, Perception, Reading};
pub use error::{SimulationError, StepLogError, WorldError};
pub use generator::{Cluster, LineGenerator, Region};
pub use grid::{Bounds, Cell, Grid, Position};
pub use heading::{Heading, Rotation};
pub use step_log::{StepLog, StepRecord};
pub use world::{Command, Outcome, World};
