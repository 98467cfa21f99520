//! # LocationEntity Trait
//!
//! The `LocationEntity` trait is the contract a piece of location state (the
//! elevator, a station) implements to be served by the generic
//! [`LocationActor`](crate::framework::LocationActor).
//!
//! # Architecture Note
//! A location is a monitor: one owner of the state, operations applied one at
//! a time, and operations whose precondition does not hold wait until it does.
//! The entity only has to say, for a single request, whether it can be served
//! *right now* ([`Served::Done`]) or not yet ([`Served::Blocked`]). Queueing,
//! re-testing after every change, and discarding abandoned requests are the
//! actor's job and are written once for all locations.
//!
//! `try_serve` is synchronous. The predicate check and the state change it
//! guards happen in one step that no other request can interleave with.

use std::fmt::Debug;
use std::sync::Arc;

use crate::framework::message::{PendingRequest, Served};
use crate::progress::Progress;
use crate::sink::LogSink;

/// Dependencies injected into a location actor when it starts running.
#[derive(Clone)]
pub struct LocationContext {
    pub sink: Arc<dyn LogSink>,
    pub progress: Progress,
}

impl LocationContext {
    pub fn new(sink: Arc<dyn LogSink>, progress: Progress) -> Self {
        Self { sink, progress }
    }

    /// Shorthand for recording a domain event on the sink.
    pub fn record(&self, component: &str, message: impl AsRef<str>) {
        self.sink.record(component, message.as_ref());
    }
}

/// Trait that any location state must implement to be served by a
/// `LocationActor`.
pub trait LocationEntity: Send + 'static {
    /// The operations this location accepts, each carrying its reply channel.
    type Request: PendingRequest + Debug;

    /// Read-only view published after every state change.
    type Snapshot: Clone + Debug + Send + Sync + 'static;

    /// Human-readable name used in logs (e.g. `station 2`).
    fn label(&self) -> String;

    fn snapshot(&self) -> Self::Snapshot;

    /// Serves `request` if its precondition holds, otherwise hands it back.
    fn try_serve(&mut self, request: Self::Request, ctx: &LocationContext) -> Served<Self::Request>;
}
