//! Elevator location actor: request types and entity implementation.

pub mod entity;
pub mod requests;

pub use entity::COMPONENT;
pub use requests::*;

use crate::clients::ElevatorClient;
use crate::framework::LocationActor;
use crate::model::Elevator;

/// Creates the elevator actor, empty at the top, and its client.
pub fn new(buffer_size: usize) -> (LocationActor<Elevator>, ElevatorClient) {
    let (actor, generic_client) = LocationActor::new(Elevator::new(), buffer_size);
    let client = ElevatorClient::new(generic_client);

    (actor, client)
}
