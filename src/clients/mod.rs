//! Type-safe wrappers around [`LocationClient`](crate::framework::LocationClient).

pub mod elevator_client;
pub mod location;
pub mod station_client;

pub use elevator_client::*;
pub use location::*;
pub use station_client::*;
