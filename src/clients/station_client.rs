use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::clients::Location;
use crate::framework::{HandoffError, LocationClient};
use crate::model::{Cart, Station, StationId, StationSnapshot};
use crate::station_actor::StationRequest;

/// Client for interacting with a station actor.
#[derive(Clone)]
pub struct StationClient {
    id: StationId,
    inner: LocationClient<Station>,
}

impl StationClient {
    pub fn new(id: StationId, inner: LocationClient<Station>) -> Self {
        Self { id, inner }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    #[instrument(skip(self), fields(station = %self.id))]
    pub async fn collect(&self) -> Result<Cart, HandoffError> {
        debug!("Sending request");
        self.inner
            .request(|respond_to| StationRequest::Collect { respond_to })
            .await
    }

    #[instrument(skip(self, cart), fields(station = %self.id, cart = %cart.id()))]
    pub async fn deliver(&self, cart: Cart) -> Result<(), HandoffError> {
        debug!("Sending request");
        self.inner
            .request(|respond_to| StationRequest::Deliver { cart, respond_to })
            .await
    }

    #[instrument(skip(self), fields(station = %self.id))]
    pub async fn deposit_cargo(&self) -> Result<(), HandoffError> {
        debug!("Sending request");
        self.inner
            .request(|respond_to| StationRequest::DepositCargo { respond_to })
            .await
    }

    pub fn snapshot(&self) -> StationSnapshot {
        self.inner.snapshot()
    }

    pub fn can_collect(&self) -> bool {
        self.snapshot().can_collect()
    }

    pub fn can_deliver(&self) -> bool {
        self.snapshot().can_deliver()
    }

    pub fn can_deposit_cargo(&self) -> bool {
        self.snapshot().can_deposit_cargo()
    }
}

#[async_trait]
impl Location for StationClient {
    fn name(&self) -> String {
        format!("station {}", self.id)
    }

    async fn collect(&self) -> Result<Cart, HandoffError> {
        StationClient::collect(self).await
    }

    async fn deliver(&self, cart: Cart) -> Result<(), HandoffError> {
        StationClient::deliver(self, cart).await
    }

    fn collect_ready(&self) -> bool {
        self.can_collect()
    }

    fn deliver_ready(&self) -> bool {
        self.can_deliver()
    }
}
