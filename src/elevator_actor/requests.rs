//! Requests served by the elevator's location actor.

use crate::framework::{PendingRequest, Response};
use crate::model::{Cart, Position};

/// Operations on the elevator. Each one waits until its precondition holds.
#[derive(Debug)]
pub enum ElevatorRequest {
    /// Moves the car to the other end unconditionally.
    Operate { respond_to: Response<Position> },
    /// Moves the car once it is empty.
    OperateEmpty { respond_to: Response<Position> },
    /// Top side: load a cart when empty at the top, then descend.
    Arrive { cart: Cart, respond_to: Response<()> },
    /// Top side: unload the cart once it is at the top.
    Depart { respond_to: Response<Cart> },
    /// Bottom side: unload the cart once it is at the bottom.
    Collect { respond_to: Response<Cart> },
    /// Bottom side: load a cart when empty at the bottom, then ascend.
    Deliver { cart: Cart, respond_to: Response<()> },
}

impl PendingRequest for ElevatorRequest {
    fn is_abandoned(&self) -> bool {
        match self {
            ElevatorRequest::Operate { respond_to } => respond_to.is_closed(),
            ElevatorRequest::OperateEmpty { respond_to } => respond_to.is_closed(),
            ElevatorRequest::Arrive { respond_to, .. } => respond_to.is_closed(),
            ElevatorRequest::Depart { respond_to } => respond_to.is_closed(),
            ElevatorRequest::Collect { respond_to } => respond_to.is_closed(),
            ElevatorRequest::Deliver { respond_to, .. } => respond_to.is_closed(),
        }
    }
}
