use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::clients::ElevatorClient;
use crate::framework::HandoffError;
use crate::model::CartId;
use crate::observer::{ActorRole, ActorToken};
use crate::workers::{Worker, WorkerContext};

const COMPONENT: &str = "CONSUMER";

/// Running statistics of carts that have left the mine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Departures {
    pub count: u64,
    /// Id and cargo of the most recent departure.
    pub last: Option<(CartId, u32)>,
}

/// Takes loaded carts out of the mine at the elevator top.
pub struct Consumer {
    token: ActorToken,
    elevator: ElevatorClient,
    departures: watch::Sender<Departures>,
}

impl Consumer {
    pub fn new(instance: usize, elevator: ElevatorClient) -> Self {
        let (departures, _) = watch::channel(Departures::default());
        Self {
            token: ActorToken::new(ActorRole::Consumer, instance),
            elevator,
            departures,
        }
    }

    /// Subscribes to the departure statistics.
    pub fn departures(&self) -> watch::Receiver<Departures> {
        self.departures.subscribe()
    }
}

#[async_trait]
impl Worker for Consumer {
    fn token(&self) -> ActorToken {
        self.token
    }

    fn can_proceed(&self) -> bool {
        self.elevator.can_depart()
    }

    async fn run(&self, ctx: WorkerContext) -> Result<(), HandoffError> {
        info!("Worker started");
        while ctx.begin_iteration(&self.token).await {
            debug!("Iteration start");
            let Some(cart) = ctx.attempt(self.elevator.depart()).await? else {
                break;
            };
            ctx.record(COMPONENT, format!("{cart} departs from mine"));
            self.departures.send_modify(|departures| {
                departures.count += 1;
                departures.last = Some((cart.id(), cart.cargo()));
            });
            if !ctx.pause(ctx.pauses.departure_pause()).await {
                break;
            }
        }
        info!("Worker stopped");
        Ok(())
    }
}
