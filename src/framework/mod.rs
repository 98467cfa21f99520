//! Generic location framework.
//!
//! Building blocks for serving a piece of shared state (a location) from a
//! single task, with operations that wait for their precondition instead of
//! failing.
//!
//! # Main Components
//!
//! - [`LocationEntity`] - Trait that location state implements to be served by an actor
//! - [`LocationActor`] - Generic actor that owns a location and serves its requests
//! - [`LocationClient`] - Cloneable handle for sending requests and reading snapshots
//! - [`HandoffError`] - Failures of the plumbing itself
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients and engines without
//! spawning real locations.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::LocationActor;
pub use client::LocationClient;
pub use entity::{LocationContext, LocationEntity};
pub use error::HandoffError;
pub use message::{PendingRequest, Reply, Response, Served};
