//! Orchestration layer: building, starting and stopping the mine.

pub mod error;
pub mod mine_system;
pub mod tracing;

pub use error::*;
pub use mine_system::*;
