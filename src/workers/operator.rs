use async_trait::async_trait;
use tracing::{debug, info};

use crate::clients::ElevatorClient;
use crate::framework::HandoffError;
use crate::observer::{ActorRole, ActorToken};
use crate::workers::{Worker, WorkerContext};

/// Moves the elevator whenever it is empty, so that a cart waiting at the
/// other end is not stuck there.
pub struct Operator {
    token: ActorToken,
    elevator: ElevatorClient,
}

impl Operator {
    pub fn new(instance: usize, elevator: ElevatorClient) -> Self {
        Self {
            token: ActorToken::new(ActorRole::Operator, instance),
            elevator,
        }
    }
}

#[async_trait]
impl Worker for Operator {
    fn token(&self) -> ActorToken {
        self.token
    }

    fn can_proceed(&self) -> bool {
        self.elevator.can_operate_empty()
    }

    async fn run(&self, ctx: WorkerContext) -> Result<(), HandoffError> {
        info!("Worker started");
        while ctx.begin_iteration(&self.token).await {
            debug!("Iteration start");
            if !ctx.pause(ctx.timings.elevator_cycle).await {
                break;
            }
            let Some(position) = ctx.attempt(self.elevator.operate_empty()).await? else {
                break;
            };
            debug!(%position, "Moved empty elevator");
            if !ctx.pause(ctx.pauses.operator_pause()).await {
                break;
            }
        }
        info!("Worker stopped");
        Ok(())
    }
}
