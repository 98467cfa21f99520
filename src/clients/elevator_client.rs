use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::clients::Location;
use crate::elevator_actor::ElevatorRequest;
use crate::framework::{HandoffError, LocationClient};
use crate::model::{Cart, Elevator, ElevatorSnapshot, Position};

/// Client for interacting with the elevator actor.
///
/// The top side (`arrive`, `depart`) is used by the producer and consumer,
/// the bottom side (`collect`, `deliver`) by the boundary engines, and
/// `operate_empty` by the operator.
#[derive(Clone)]
pub struct ElevatorClient {
    inner: LocationClient<Elevator>,
}

impl ElevatorClient {
    pub fn new(inner: LocationClient<Elevator>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn operate(&self) -> Result<Position, HandoffError> {
        debug!("Sending request");
        self.inner
            .request(|respond_to| ElevatorRequest::Operate { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn operate_empty(&self) -> Result<Position, HandoffError> {
        debug!("Sending request");
        self.inner
            .request(|respond_to| ElevatorRequest::OperateEmpty { respond_to })
            .await
    }

    #[instrument(skip(self, cart), fields(cart = %cart.id()))]
    pub async fn arrive(&self, cart: Cart) -> Result<(), HandoffError> {
        debug!("Sending request");
        self.inner
            .request(|respond_to| ElevatorRequest::Arrive { cart, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn depart(&self) -> Result<Cart, HandoffError> {
        debug!("Sending request");
        self.inner
            .request(|respond_to| ElevatorRequest::Depart { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn collect(&self) -> Result<Cart, HandoffError> {
        debug!("Sending request");
        self.inner
            .request(|respond_to| ElevatorRequest::Collect { respond_to })
            .await
    }

    #[instrument(skip(self, cart), fields(cart = %cart.id()))]
    pub async fn deliver(&self, cart: Cart) -> Result<(), HandoffError> {
        debug!("Sending request");
        self.inner
            .request(|respond_to| ElevatorRequest::Deliver { cart, respond_to })
            .await
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        self.inner.snapshot()
    }

    pub fn can_arrive(&self) -> bool {
        self.snapshot().can_arrive()
    }

    pub fn can_depart(&self) -> bool {
        self.snapshot().can_depart()
    }

    pub fn can_collect_from_bottom(&self) -> bool {
        self.snapshot().can_collect_from_bottom()
    }

    pub fn can_deliver_to_bottom(&self) -> bool {
        self.snapshot().can_deliver_to_bottom()
    }

    pub fn can_operate_empty(&self) -> bool {
        self.snapshot().can_operate_empty()
    }
}

/// Engines only ever see the bottom of the shaft.
#[async_trait]
impl Location for ElevatorClient {
    fn name(&self) -> String {
        "elevator".to_string()
    }

    async fn collect(&self) -> Result<Cart, HandoffError> {
        ElevatorClient::collect(self).await
    }

    async fn deliver(&self, cart: Cart) -> Result<(), HandoffError> {
        ElevatorClient::deliver(self, cart).await
    }

    fn collect_ready(&self) -> bool {
        self.can_collect_from_bottom()
    }

    fn deliver_ready(&self) -> bool {
        self.can_deliver_to_bottom()
    }
}
