//! Station location actor: request types and entity implementation.

pub mod entity;
pub mod requests;

pub use entity::component;
pub use requests::*;

use crate::clients::StationClient;
use crate::framework::LocationActor;
use crate::model::{Station, StationId};

/// Creates an empty station actor without cargo, and its client.
pub fn new(id: impl Into<StationId>, buffer_size: usize) -> (LocationActor<Station>, StationClient) {
    let station = Station::new(id);
    let id = station.id();
    let (actor, generic_client) = LocationActor::new(station, buffer_size);
    let client = StationClient::new(id, generic_client);

    (actor, client)
}
