use async_trait::async_trait;
use tracing::{debug, info};

use crate::clients::StationClient;
use crate::framework::HandoffError;
use crate::observer::{ActorRole, ActorToken};
use crate::workers::{Worker, WorkerContext};

/// Mines cargo and deposits it at its own station, one unit at a time.
pub struct Miner {
    token: ActorToken,
    station: StationClient,
}

impl Miner {
    /// A miner takes the instance number of the station it works at.
    pub fn new(station: StationClient) -> Self {
        Self {
            token: ActorToken::new(ActorRole::Miner, station.id().0),
            station,
        }
    }
}

#[async_trait]
impl Worker for Miner {
    fn token(&self) -> ActorToken {
        self.token
    }

    fn can_proceed(&self) -> bool {
        self.station.can_deposit_cargo()
    }

    async fn run(&self, ctx: WorkerContext) -> Result<(), HandoffError> {
        info!(station = %self.station.id(), "Worker started");
        while ctx.begin_iteration(&self.token).await {
            debug!("Iteration start");
            if !ctx.pause(ctx.timings.mining).await {
                break;
            }
            if ctx.attempt(self.station.deposit_cargo()).await?.is_none() {
                break;
            }
            if !ctx.pause(ctx.pauses.miner_pause()).await {
                break;
            }
        }
        info!("Worker stopped");
        Ok(())
    }
}
