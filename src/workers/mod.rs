//! The active parts of the mine: each worker runs its own loop as a task and
//! moves carts or cargo through the locations.
//!
//! | Worker     | Loop                                                      |
//! |------------|-----------------------------------------------------------|
//! | `Producer` | new cart, `arrive` at the elevator top, arrival pause     |
//! | `Consumer` | `depart` from the elevator top, departure pause           |
//! | `Operator` | elevator cycle, `operate_empty`, operator pause           |
//! | `Miner`    | mining time, `deposit_cargo` at its station, miner pause  |
//! | `Engine`   | `collect` at origin, transit time, `deliver` at destination |
//!
//! Every worker stops as soon as its context's shutdown token is cancelled,
//! whether it is sleeping or waiting on a location.

pub mod consumer;
pub mod context;
pub mod engine;
pub mod miner;
pub mod operator;
pub mod producer;

pub use consumer::*;
pub use context::*;
pub use engine::*;
pub use miner::*;
pub use operator::*;
pub use producer::*;

use async_trait::async_trait;

use crate::framework::HandoffError;
use crate::observer::ActorToken;

#[async_trait]
pub trait Worker: Send + Sync + 'static {
    fn token(&self) -> ActorToken;

    /// Whether the operation the worker is waiting on could proceed now.
    /// Instrumentation only.
    fn can_proceed(&self) -> bool;

    /// Runs the loop until cancelled (`Ok`) or a location becomes
    /// unreachable (`Err`).
    async fn run(&self, ctx: WorkerContext) -> Result<(), HandoffError>;
}
