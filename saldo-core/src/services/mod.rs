//! Business logic services

pub mod refresh;
pub mod render;

pub use refresh::RefreshService;
pub use render::{projected_balance, projection_cutoff, Line, Renderer};
