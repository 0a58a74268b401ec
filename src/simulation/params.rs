//! Simulation defaults.

pub const GRID_WIDTH: i32 = 25;
pub const GRID_HEIGHT: i32 = 20;
pub const TICK_MILLIS: u64 = 200; // 5 steps per second

pub const REGION_COLUMNS: u32 = 3;
pub const REGION_ROWS: u32 = 2;
pub const SEED_WINDOW: u32 = 5; // Seed cells land near each region's top-left corner
pub const WALK_MIN_STEPS: u32 = 8;
pub const WALK_MAX_STEPS: u32 = 15;

pub const TABLE_ROWS: usize = 8;
pub const EXPORT_PREFIX: &str = "agent_export";
