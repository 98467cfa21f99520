//! LocationEntity implementation for the [`Elevator`].
//!
//! Maps each [`ElevatorRequest`] onto the elevator's `try_*` transitions and
//! records the shaft movements on the log sink under `ELEVATOR`.

use crate::elevator_actor::ElevatorRequest;
use crate::framework::{LocationContext, LocationEntity, Served};
use crate::model::{Elevator, ElevatorSnapshot, Position};

pub const COMPONENT: &str = "ELEVATOR";

impl Elevator {
    fn record_movement(&self, ctx: &LocationContext) {
        let direction = match self.position() {
            Position::Bottom => "descends",
            Position::Top => "ascends",
        };
        match self.cart() {
            Some(cart) => ctx.record(COMPONENT, format!("{direction} with {cart}")),
            None => ctx.record(COMPONENT, format!("{direction} (empty)")),
        }
    }
}

impl LocationEntity for Elevator {
    type Request = ElevatorRequest;
    type Snapshot = ElevatorSnapshot;

    fn label(&self) -> String {
        self.to_string()
    }

    fn snapshot(&self) -> ElevatorSnapshot {
        Elevator::snapshot(self)
    }

    fn try_serve(&mut self, request: ElevatorRequest, ctx: &LocationContext) -> Served<ElevatorRequest> {
        match request {
            ElevatorRequest::Operate { respond_to } => {
                let position = self.operate();
                self.record_movement(ctx);
                Served::reply(respond_to, position)
            }
            ElevatorRequest::OperateEmpty { respond_to } => match self.try_operate_empty() {
                Some(position) => {
                    self.record_movement(ctx);
                    Served::reply(respond_to, position)
                }
                None => Served::Blocked(ElevatorRequest::OperateEmpty { respond_to }),
            },
            ElevatorRequest::Arrive { cart, respond_to } => match self.try_arrive(cart) {
                Ok(_) => {
                    self.record_movement(ctx);
                    Served::reply(respond_to, ())
                }
                Err(cart) => Served::Blocked(ElevatorRequest::Arrive { cart, respond_to }),
            },
            ElevatorRequest::Depart { respond_to } => match self.try_depart() {
                Some(cart) => Served::reply(respond_to, cart),
                None => Served::Blocked(ElevatorRequest::Depart { respond_to }),
            },
            ElevatorRequest::Collect { respond_to } => match self.try_collect() {
                Some(cart) => {
                    ctx.record(COMPONENT, format!("{cart} collected from elevator"));
                    Served::reply(respond_to, cart)
                }
                None => Served::Blocked(ElevatorRequest::Collect { respond_to }),
            },
            ElevatorRequest::Deliver { cart, respond_to } => match self.try_deliver(cart) {
                Ok(_) => {
                    if let Some(cart) = self.cart() {
                        ctx.record(COMPONENT, format!("{cart} delivered to elevator"));
                    }
                    self.record_movement(ctx);
                    Served::reply(respond_to, ())
                }
                Err(cart) => Served::Blocked(ElevatorRequest::Deliver { cart, respond_to }),
            },
        }
    }
}
