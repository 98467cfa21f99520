//! LocationEntity implementation for [`Station`].

use crate::framework::{LocationContext, LocationEntity, Served};
use crate::model::{Station, StationId, StationSnapshot};
use crate::station_actor::StationRequest;

/// Log component of a station, e.g. `STATION-2`.
pub fn component(id: StationId) -> String {
    format!("STATION-{id}")
}

impl LocationEntity for Station {
    type Request = StationRequest;
    type Snapshot = StationSnapshot;

    fn label(&self) -> String {
        self.to_string()
    }

    fn snapshot(&self) -> StationSnapshot {
        Station::snapshot(self)
    }

    fn try_serve(&mut self, request: StationRequest, ctx: &LocationContext) -> Served<StationRequest> {
        let id = self.id();
        match request {
            StationRequest::Collect { respond_to } => match self.try_collect() {
                Some(cart) => {
                    let component = component(id);
                    ctx.record(&component, format!("{cart} loaded with cargo"));
                    ctx.record(&component, format!("{cart} collected from station {id}"));
                    Served::reply(respond_to, cart)
                }
                None => Served::Blocked(StationRequest::Collect { respond_to }),
            },
            StationRequest::Deliver { cart, respond_to } => match self.try_deliver(cart) {
                Ok(()) => {
                    if let Some(cart) = self.cart() {
                        ctx.record(&component(id), format!("{cart} delivered to station {id}"));
                    }
                    Served::reply(respond_to, ())
                }
                Err(cart) => Served::Blocked(StationRequest::Deliver { cart, respond_to }),
            },
            StationRequest::DepositCargo { respond_to } => {
                if self.try_deposit_cargo() {
                    Served::reply(respond_to, ())
                } else {
                    Served::Blocked(StationRequest::DepositCargo { respond_to })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CartFactory;
    use crate::progress::Progress;
    use crate::sink::RecordingSink;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    #[test]
    fn test_collect_logs_load_and_collection() {
        let sink = Arc::new(RecordingSink::new());
        let ctx = LocationContext::new(sink.clone(), Progress::new());
        let mut station = Station::new(2usize);
        assert!(station.try_deliver(CartFactory::new().next_cart()).is_ok());
        assert!(station.try_deposit_cargo());
        let (respond_to, mut response) = oneshot::channel();

        match station.try_serve(StationRequest::Collect { respond_to }, &ctx) {
            Served::Done(reply) => assert!(reply()),
            Served::Blocked(request) => panic!("Collect should be served, got {:?}", request),
        }

        assert_eq!(response.try_recv().unwrap().cargo(), 1);
        assert_eq!(
            sink.messages_for("STATION-2"),
            vec!["cart [1] (1) loaded with cargo", "cart [1] (1) collected from station 2"]
        );
    }

    #[test]
    fn test_collect_without_cargo_is_blocked() {
        let ctx = LocationContext::new(Arc::new(RecordingSink::new()), Progress::new());
        let mut station = Station::new(0usize);
        assert!(station.try_deliver(CartFactory::new().next_cart()).is_ok());
        let (respond_to, _response) = oneshot::channel();

        let served = station.try_serve(StationRequest::Collect { respond_to }, &ctx);

        assert!(matches!(served, Served::Blocked(StationRequest::Collect { .. })));
        assert!(station.cart().is_some());
    }

    #[test]
    fn test_second_deposit_is_blocked() {
        let ctx = LocationContext::new(Arc::new(RecordingSink::new()), Progress::new());
        let mut station = Station::new(0usize);
        let (first, _first_rx) = oneshot::channel();
        let (second, _second_rx) = oneshot::channel();

        assert!(matches!(
            station.try_serve(StationRequest::DepositCargo { respond_to: first }, &ctx),
            Served::Done(_)
        ));
        assert!(matches!(
            station.try_serve(StationRequest::DepositCargo { respond_to: second }, &ctx),
            Served::Blocked(_)
        ));
    }
}
