use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::clients::Location;
use crate::framework::HandoffError;
use crate::observer::{ActorRole, ActorToken};
use crate::workers::{Worker, WorkerContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Waiting to collect a cart at the origin.
    AwaitingOrigin,
    /// Carrying a cart to the destination.
    EnRoute,
}

/// Shuttles carts from one location to the next, one at a time.
pub struct Engine {
    token: ActorToken,
    origin: Arc<dyn Location>,
    destination: Arc<dyn Location>,
    en_route: AtomicBool,
}

impl Engine {
    pub fn new(instance: usize, origin: Arc<dyn Location>, destination: Arc<dyn Location>) -> Self {
        Self {
            token: ActorToken::new(ActorRole::Engine, instance),
            origin,
            destination,
            en_route: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> EngineState {
        if self.en_route.load(Ordering::SeqCst) {
            EngineState::EnRoute
        } else {
            EngineState::AwaitingOrigin
        }
    }
}

#[async_trait]
impl Worker for Engine {
    fn token(&self) -> ActorToken {
        self.token
    }

    fn can_proceed(&self) -> bool {
        match self.state() {
            EngineState::AwaitingOrigin => self.origin.collect_ready(),
            EngineState::EnRoute => self.destination.deliver_ready(),
        }
    }

    async fn run(&self, ctx: WorkerContext) -> Result<(), HandoffError> {
        let origin = self.origin.name();
        let destination = self.destination.name();
        info!(%origin, %destination, "Worker started");

        while ctx.begin_iteration(&self.token).await {
            debug!("Iteration start");
            let Some(cart) = ctx.attempt(self.origin.collect()).await? else {
                break;
            };
            let cart_id = cart.id();
            self.en_route.store(true, Ordering::SeqCst);
            debug!(cart = %cart_id, %origin, "Collected");

            // A cart in transit when shutdown arrives leaves the loop with
            // this task.
            if !ctx.pause(ctx.timings.transit).await {
                break;
            }
            if ctx.attempt(self.destination.deliver(cart)).await?.is_none() {
                break;
            }
            self.en_route.store(false, Ordering::SeqCst);
            debug!(cart = %cart_id, %destination, "Delivered");
        }

        info!("Worker stopped");
        Ok(())
    }
}
