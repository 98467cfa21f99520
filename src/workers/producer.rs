use async_trait::async_trait;
use tracing::{debug, info};

use crate::clients::ElevatorClient;
use crate::framework::HandoffError;
use crate::model::CartFactory;
use crate::observer::{ActorRole, ActorToken};
use crate::workers::{Worker, WorkerContext};

const COMPONENT: &str = "PRODUCER";

/// Sends new, empty carts into the mine at the elevator top.
pub struct Producer {
    token: ActorToken,
    elevator: ElevatorClient,
    factory: CartFactory,
}

impl Producer {
    pub fn new(instance: usize, elevator: ElevatorClient) -> Self {
        Self {
            token: ActorToken::new(ActorRole::Producer, instance),
            elevator,
            factory: CartFactory::new(),
        }
    }
}

#[async_trait]
impl Worker for Producer {
    fn token(&self) -> ActorToken {
        self.token
    }

    fn can_proceed(&self) -> bool {
        self.elevator.can_arrive()
    }

    async fn run(&self, ctx: WorkerContext) -> Result<(), HandoffError> {
        info!("Worker started");
        while ctx.begin_iteration(&self.token).await {
            let cart = self.factory.next_cart();
            debug!(cart = %cart.id(), "Iteration start");
            ctx.record(COMPONENT, format!("{cart} arrives at the mine"));
            if ctx.attempt(self.elevator.arrive(cart)).await?.is_none() {
                break;
            }
            if !ctx.pause(ctx.pauses.arrival_pause()).await {
                break;
            }
        }
        info!("Worker stopped");
        Ok(())
    }
}
