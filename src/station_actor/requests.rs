//! Requests served by a station's location actor.

use crate::framework::{PendingRequest, Response};
use crate::model::Cart;

#[derive(Debug)]
pub enum StationRequest {
    /// Takes the waiting cart once cargo is present, loading one unit onto it.
    Collect { respond_to: Response<Cart> },
    /// Leaves a cart once the slot is free.
    Deliver { cart: Cart, respond_to: Response<()> },
    /// Puts cargo on the platform once the previous unit has been taken.
    DepositCargo { respond_to: Response<()> },
}

impl PendingRequest for StationRequest {
    fn is_abandoned(&self) -> bool {
        match self {
            StationRequest::Collect { respond_to } => respond_to.is_closed(),
            StationRequest::Deliver { respond_to, .. } => respond_to.is_closed(),
            StationRequest::DepositCargo { respond_to } => respond_to.is_closed(),
        }
    }
}
