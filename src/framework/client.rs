//! # Generic Location Client
//!
//! This module defines the generic client for communicating with location
//! actors.

use tokio::sync::{mpsc, oneshot, watch};

use crate::framework::entity::LocationEntity;
use crate::framework::error::HandoffError;
use crate::framework::message::Response;

/// A type-safe client for interacting with a `LocationActor`.
///
/// Holds the request sender and a receiver of the latest published snapshot,
/// so cloning is cheap and readiness checks never round-trip to the actor.
pub struct LocationClient<T: LocationEntity> {
    sender: mpsc::Sender<T::Request>,
    snapshot: watch::Receiver<T::Snapshot>,
}

impl<T: LocationEntity> Clone for LocationClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            snapshot: self.snapshot.clone(),
        }
    }
}

impl<T: LocationEntity> LocationClient<T> {
    pub fn new(sender: mpsc::Sender<T::Request>, snapshot: watch::Receiver<T::Snapshot>) -> Self {
        Self { sender, snapshot }
    }

    /// Sends the request built by `make` and waits until the location serves it.
    ///
    /// Dropping the returned future abandons the request; the actor discards
    /// it instead of serving it.
    pub async fn request<R>(
        &self,
        make: impl FnOnce(Response<R>) -> T::Request,
    ) -> Result<R, HandoffError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| HandoffError::LocationClosed)?;
        response.await.map_err(|_| HandoffError::RequestDropped)
    }

    /// The state as of the most recent completed operation.
    pub fn snapshot(&self) -> T::Snapshot {
        self.snapshot.borrow().clone()
    }
}
