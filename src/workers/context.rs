//! Dependencies and cancellation helpers shared by every worker loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::Timings;
use crate::framework::HandoffError;
use crate::observer::{ActorToken, LoopObserver, NoopObserver};
use crate::pause::{PauseSource, RandomPauses};
use crate::sink::{LogSink, TracingSink};

/// What a worker needs while it runs, injected when it is spawned.
#[derive(Clone)]
pub struct WorkerContext {
    pub shutdown: CancellationToken,
    pub pauses: Arc<dyn PauseSource>,
    pub sink: Arc<dyn LogSink>,
    pub observer: Arc<dyn LoopObserver>,
    pub timings: Timings,
}

impl WorkerContext {
    /// A context with random pauses, the tracing sink and no observer.
    pub fn new(shutdown: CancellationToken, timings: Timings) -> Self {
        Self {
            shutdown,
            pauses: Arc::new(RandomPauses::default()),
            sink: Arc::new(TracingSink),
            observer: Arc::new(NoopObserver),
            timings,
        }
    }

    pub fn with_pauses(mut self, pauses: Arc<dyn PauseSource>) -> Self {
        self.pauses = pauses;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn LoopObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn record(&self, component: &str, message: impl AsRef<str>) {
        self.sink.record(component, message.as_ref());
    }

    /// Top of a loop iteration. Returns `false` once the worker should stop.
    pub async fn begin_iteration(&self, token: &ActorToken) -> bool {
        if self.shutdown.is_cancelled() {
            return false;
        }
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => false,
            _ = self.observer.on_loop_iteration(token) => true,
        }
    }

    /// Sleeps for `duration`. Returns `false` if cancelled first.
    pub async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => false,
            _ = tokio::time::sleep(duration) => true,
        }
    }

    /// Runs a location operation, giving up if cancelled first.
    ///
    /// `Ok(None)` means cancelled: the operation was abandoned and has had no
    /// effect on the location.
    pub async fn attempt<T, F>(&self, operation: F) -> Result<Option<T>, HandoffError>
    where
        F: Future<Output = Result<T, HandoffError>>,
    {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Ok(None),
            result = operation => result.map(Some),
        }
    }
}
