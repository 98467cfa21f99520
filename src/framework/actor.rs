//! # Generic Location Server
//!
//! This module defines the `LocationActor`, the task that owns a location's
//! state and serves requests against it. It is the "Server" side of a
//! location: clients send requests over an mpsc channel, the actor applies
//! them one at a time and answers over a oneshot channel.

use std::collections::VecDeque;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::framework::client::LocationClient;
use crate::framework::entity::{LocationContext, LocationEntity};
use crate::framework::message::{PendingRequest, Served};

/// The generic actor that serves one location.
///
/// # Architecture Note
/// The actor owns the entity outright, so no `Mutex` guards it: every
/// operation runs inside this task, one after another, which is what makes
/// each handoff atomic.
///
/// **Blocking semantics**:
/// A request whose precondition does not hold is not refused. It is parked in
/// `waiting` and offered to the entity again after every state change, oldest
/// first, until a full pass changes nothing. A client therefore just awaits
/// its reply for as long as the location is not ready.
///
/// **Cancellation**:
/// If the caller drops its future, the reply channel closes. Parked requests
/// in that state are discarded before they are offered again, so a cancelled
/// worker never takes a cart it will not receive.
///
/// # Usage Pattern
///
/// 1.  **Create**: `LocationActor::new(entity, buffer)` returns the actor and a
///     cloneable [`LocationClient`].
/// 2.  **Run**: spawn `actor.run(context)`. The loop ends once every client
///     has been dropped.
pub struct LocationActor<T: LocationEntity> {
    receiver: mpsc::Receiver<T::Request>,
    entity: T,
    waiting: VecDeque<T::Request>,
    snapshot: watch::Sender<T::Snapshot>,
}

impl<T: LocationEntity> LocationActor<T> {
    /// Creates a new `LocationActor` around `entity` and its `LocationClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. Blocked requests
    /// do not count against it; they are moved to the waiting queue.
    pub fn new(entity: T, buffer_size: usize) -> (Self, LocationClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshot, snapshot_rx) = watch::channel(entity.snapshot());
        let actor = Self {
            receiver,
            entity,
            waiting: VecDeque::new(),
            snapshot,
        };
        let client = LocationClient::new(sender, snapshot_rx);
        (actor, client)
    }

    /// Runs the actor's event loop until the channel closes.
    pub async fn run(mut self, context: LocationContext) {
        let location = self.entity.label();
        info!(%location, "Location started");

        while let Some(request) = self.receiver.recv().await {
            debug!(%location, ?request, "Request");
            self.waiting.push_back(request);
            self.serve_waiting(&context, &location);
        }

        info!(%location, waiting = self.waiting.len(), "Shutdown");
    }

    /// Offers every parked request to the entity until a pass makes no change.
    fn serve_waiting(&mut self, context: &LocationContext, location: &str) {
        loop {
            let mut changed = false;
            let mut still_waiting = VecDeque::with_capacity(self.waiting.len());

            while let Some(request) = self.waiting.pop_front() {
                if request.is_abandoned() {
                    debug!(%location, ?request, "Dropping abandoned request");
                    continue;
                }
                match self.entity.try_serve(request, context) {
                    Served::Done(reply) => {
                        context.progress.record();
                        self.snapshot.send_replace(self.entity.snapshot());
                        if !reply() {
                            warn!(%location, "Caller left before the reply, result discarded");
                        }
                        changed = true;
                    }
                    Served::Blocked(request) => still_waiting.push_back(request),
                }
            }

            self.waiting = still_waiting;
            if !changed {
                break;
            }
        }

        if !self.waiting.is_empty() {
            debug!(%location, blocked = self.waiting.len(), "Waiting");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::message::Response;
    use crate::progress::Progress;
    use crate::sink::RecordingSink;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    /// A counter that can be taken from only while positive.
    struct Tokens {
        available: u32,
    }

    #[derive(Debug)]
    enum TokenRequest {
        Take { respond_to: Response<u32> },
        Put { respond_to: Response<()> },
    }

    impl PendingRequest for TokenRequest {
        fn is_abandoned(&self) -> bool {
            match self {
                TokenRequest::Take { respond_to } => respond_to.is_closed(),
                TokenRequest::Put { respond_to } => respond_to.is_closed(),
            }
        }
    }

    impl LocationEntity for Tokens {
        type Request = TokenRequest;
        type Snapshot = u32;

        fn label(&self) -> String {
            "tokens".to_string()
        }

        fn snapshot(&self) -> u32 {
            self.available
        }

        fn try_serve(&mut self, request: TokenRequest, ctx: &LocationContext) -> Served<TokenRequest> {
            match request {
                TokenRequest::Take { respond_to } if self.available > 0 => {
                    self.available -= 1;
                    ctx.record("TOKENS", "taken");
                    Served::reply(respond_to, self.available)
                }
                TokenRequest::Put { respond_to } => {
                    self.available += 1;
                    ctx.record("TOKENS", "put");
                    Served::reply(respond_to, ())
                }
                blocked => Served::Blocked(blocked),
            }
        }
    }

    fn spawn_tokens(available: u32) -> (LocationClient<Tokens>, Progress, Arc<RecordingSink>) {
        let (actor, client) = LocationActor::new(Tokens { available }, 8);
        let progress = Progress::new();
        let sink = Arc::new(RecordingSink::new());
        tokio::spawn(actor.run(LocationContext::new(sink.clone(), progress.clone())));
        (client, progress, sink)
    }

    async fn take(client: &LocationClient<Tokens>) -> u32 {
        client
            .request(|respond_to| TokenRequest::Take { respond_to })
            .await
            .unwrap()
    }

    async fn put(client: &LocationClient<Tokens>) {
        client
            .request(|respond_to| TokenRequest::Put { respond_to })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_ready_request_is_served_immediately() {
        let (client, progress, _) = spawn_tokens(1);

        assert_eq!(take(&client).await, 0);
        assert_eq!(progress.snapshot(), 1);
        assert_eq!(client.snapshot(), 0);
    }

    #[tokio::test]
    async fn test_blocked_request_waits_for_state_change() {
        let (client, progress, _) = spawn_tokens(0);

        let taker = tokio::spawn({
            let client = client.clone();
            async move { take(&client).await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!taker.is_finished());
        assert_eq!(progress.snapshot(), 0);

        put(&client).await;

        let left = timeout(Duration::from_secs(1), taker).await.unwrap().unwrap();
        assert_eq!(left, 0);
        assert_eq!(progress.snapshot(), 2);
    }

    #[tokio::test]
    async fn test_waiters_are_served_oldest_first() {
        let (client, _, sink) = spawn_tokens(0);

        let first = tokio::spawn({
            let client = client.clone();
            async move { take(&client).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = tokio::spawn({
            let client = client.clone();
            async move { take(&client).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        put(&client).await;
        timeout(Duration::from_secs(1), first).await.unwrap().unwrap();
        assert!(!second.is_finished());

        put(&client).await;
        timeout(Duration::from_secs(1), second).await.unwrap().unwrap();
        assert_eq!(sink.messages_for("TOKENS"), vec!["put", "taken", "put", "taken"]);
    }

    #[tokio::test]
    async fn test_abandoned_request_is_not_served() {
        let (client, progress, _) = spawn_tokens(0);

        let abandoned = timeout(Duration::from_millis(20), take(&client)).await;
        assert!(abandoned.is_err());

        put(&client).await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(client.snapshot(), 1, "Token must still be available");
        assert_eq!(progress.snapshot(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_published_before_reply() {
        let (client, _, _) = spawn_tokens(0);

        put(&client).await;
        assert_eq!(client.snapshot(), 1);
        put(&client).await;
        assert_eq!(client.snapshot(), 2);
    }
}
