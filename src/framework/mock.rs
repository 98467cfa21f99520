//! # Mock Framework
//!
//! Utilities for testing clients and engines in isolation.
//!
//! - [`create_mock_client`] gives a client whose requests land on a receiver
//!   the test controls, plus the sender for its snapshots.
//! - [`MockLocation`] is a scripted [`Location`] for driving an engine
//!   without running real location actors.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{mpsc, watch, Mutex};

use crate::clients::Location;
use crate::framework::{HandoffError, LocationClient, LocationEntity};
use crate::model::Cart;

/// Creates a client, the receiver for its requests, and the sender that
/// controls what `snapshot()` returns.
///
/// # Testing Strategy
/// Tests for a domain client (e.g. `ElevatorClient`) don't need a running
/// `LocationActor`. They inspect the request arriving on `receiver`, answer
/// through its `respond_to`, and assert on what the client returns.
pub fn create_mock_client<T: LocationEntity>(
    buffer_size: usize,
    initial: T::Snapshot,
) -> (
    LocationClient<T>,
    mpsc::Receiver<T::Request>,
    watch::Sender<T::Snapshot>,
) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (snapshot_tx, snapshot_rx) = watch::channel(initial);
    (LocationClient::new(sender, snapshot_rx), receiver, snapshot_tx)
}

/// Helper to take the next request off a mock client's receiver.
pub async fn expect_request<T: LocationEntity>(
    receiver: &mut mpsc::Receiver<T::Request>,
) -> Option<T::Request> {
    receiver.recv().await
}

/// A location that hands out carts queued with [`MockLocation::push_cart`] and
/// records every cart delivered to it.
///
/// `collect` waits until a cart has been pushed, like a real location waiting
/// for its precondition. `deliver` always succeeds immediately.
///
/// # Example
/// ```ignore
/// let origin = Arc::new(MockLocation::new("origin"));
/// let destination = Arc::new(MockLocation::new("destination"));
/// origin.push_cart(CartFactory::new().next_cart());
/// // ... run an engine between them ...
/// let cart = destination.next_delivery().await;
/// origin.verify();
/// ```
pub struct MockLocation {
    name: String,
    outbound_tx: mpsc::UnboundedSender<Cart>,
    outbound_rx: Mutex<mpsc::UnboundedReceiver<Cart>>,
    delivered_tx: mpsc::UnboundedSender<Cart>,
    delivered_rx: Mutex<mpsc::UnboundedReceiver<Cart>>,
    queued: AtomicUsize,
    accepting: AtomicBool,
}

impl MockLocation {
    pub fn new(name: impl Into<String>) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (delivered_tx, delivered_rx) = mpsc::unbounded_channel();
        Self {
            name: name.into(),
            outbound_tx,
            outbound_rx: Mutex::new(outbound_rx),
            delivered_tx,
            delivered_rx: Mutex::new(delivered_rx),
            queued: AtomicUsize::new(0),
            accepting: AtomicBool::new(true),
        }
    }

    /// Makes `cart` available to the next `collect`.
    pub fn push_cart(&self, cart: Cart) {
        self.queued.fetch_add(1, Ordering::SeqCst);
        // The receiver lives as long as `self`.
        let _ = self.outbound_tx.send(cart);
    }

    /// Waits for the next cart delivered here.
    pub async fn next_delivery(&self) -> Option<Cart> {
        self.delivered_rx.lock().await.recv().await
    }

    /// Controls what `deliver_ready` reports.
    pub fn set_accepting(&self, accepting: bool) {
        self.accepting.store(accepting, Ordering::SeqCst);
    }

    /// Asserts that every pushed cart has been collected.
    pub fn verify(&self) {
        let queued = self.queued.load(Ordering::SeqCst);
        if queued != 0 {
            panic!("{} still holds {} uncollected cart(s)", self.name, queued);
        }
    }
}

#[async_trait]
impl Location for MockLocation {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn collect(&self) -> Result<Cart, HandoffError> {
        let mut outbound = self.outbound_rx.lock().await;
        let cart = outbound.recv().await.ok_or(HandoffError::LocationClosed)?;
        self.queued.fetch_sub(1, Ordering::SeqCst);
        Ok(cart)
    }

    async fn deliver(&self, cart: Cart) -> Result<(), HandoffError> {
        self.delivered_tx
            .send(cart)
            .map_err(|_| HandoffError::LocationClosed)
    }

    fn collect_ready(&self) -> bool {
        self.queued.load(Ordering::SeqCst) > 0
    }

    fn deliver_ready(&self) -> bool {
        self.accepting.load(Ordering::SeqCst)
    }
}
