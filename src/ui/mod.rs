//! Terminal front-end: field rasterisation, dashboard layout and key bindings.

pub mod field;
pub mod input;
pub mod render;
