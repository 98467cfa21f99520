use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};

use crate::clients::{ElevatorClient, Location, StationClient};
use crate::config::MineConfig;
use crate::framework::{HandoffError, LocationContext};
use crate::lifecycle::LifecycleError;
use crate::observer::{ActorToken, LoopObserver, NoopObserver};
use crate::pause::{PauseSource, RandomPauses};
use crate::progress::{Progress, Watchdog};
use crate::sink::{LogSink, TracingSink};
use crate::workers::{Consumer, Departures, Engine, Miner, Operator, Producer, Worker, WorkerContext};

/// The pluggable parts of a mine: where pauses come from, where domain events
/// go, and who is told about every loop iteration.
#[derive(Clone)]
pub struct Collaborators {
    pub pauses: Arc<dyn PauseSource>,
    pub sink: Arc<dyn LogSink>,
    pub observer: Arc<dyn LoopObserver>,
}

impl Collaborators {
    /// Random pauses bounded by `config`, the tracing sink, no observer.
    pub fn for_config(config: &MineConfig) -> Self {
        Self {
            pauses: Arc::new(RandomPauses::new(config.pause_bounds())),
            ..Self::default()
        }
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            pauses: Arc::new(RandomPauses::default()),
            sink: Arc::new(TracingSink),
            observer: Arc::new(NoopObserver),
        }
    }
}

/// Outcome of stopping the workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Workers that stopped within the join timeout.
    pub joined: Vec<ActorToken>,
    /// Workers that had to be aborted.
    pub timed_out: Vec<ActorToken>,
}

/// The runtime orchestrator of a mine.
///
/// `MineSystem` is responsible for:
/// - **Wiring**: one elevator, `n` stations, a miner per station, `n - 1`
///   engines between neighbouring stations, one engine from the elevator to
///   the first station and one from the last station back to the elevator,
///   plus the producer, consumer and operator.
/// - **Lifecycle Management**: spawning every worker and stopping them again
///   within a bounded time.
///
/// # Architecture
///
/// Locations are passive: their actors are spawned by [`MineSystem::build`]
/// and only serve requests. Workers are active and only run after
/// [`MineSystem::start_all`].
///
/// # Example
///
/// ```ignore
/// let mut mine = MineSystem::build(&MineConfig::default(), Collaborators::default())?;
/// mine.start_all()?;
/// tokio::time::sleep(Duration::from_secs(5)).await;
/// let report = mine.shutdown().await?;
/// ```
pub struct MineSystem {
    elevator: ElevatorClient,
    stations: Vec<StationClient>,
    workers: Vec<Arc<dyn Worker>>,
    departures: watch::Receiver<Departures>,
    progress: Progress,
    context: WorkerContext,
    join_timeout: Duration,
    started: bool,
    running: Vec<(ActorToken, JoinHandle<Result<(), HandoffError>>)>,
    location_handles: Vec<JoinHandle<()>>,
}

impl MineSystem {
    /// Validates `config`, spawns the location actors and creates (but does
    /// not start) every worker. Must be called within a tokio runtime.
    pub fn build(config: &MineConfig, collaborators: Collaborators) -> Result<Self, LifecycleError> {
        config.validate()?;
        let n = config.stations;
        let progress = Progress::new();

        // 1. Locations
        let location_context = LocationContext::new(collaborators.sink.clone(), progress.clone());
        let (elevator_actor, elevator) = crate::elevator_actor::new(config.channel_capacity);
        let mut location_handles = vec![tokio::spawn(elevator_actor.run(location_context.clone()))];

        let mut stations = Vec::with_capacity(n);
        for id in 0..n {
            let (station_actor, station) = crate::station_actor::new(id, config.channel_capacity);
            location_handles.push(tokio::spawn(station_actor.run(location_context.clone())));
            stations.push(station);
        }

        // 2. Workers, in start order
        let mut workers: Vec<Arc<dyn Worker>> = Vec::with_capacity(2 * n + 4);
        for station in &stations {
            workers.push(Arc::new(Miner::new(station.clone())));
        }
        for (i, pair) in stations.windows(2).enumerate() {
            let origin: Arc<dyn Location> = Arc::new(pair[0].clone());
            let destination: Arc<dyn Location> = Arc::new(pair[1].clone());
            workers.push(Arc::new(Engine::new(i, origin, destination)));
        }
        let shaft: Arc<dyn Location> = Arc::new(elevator.clone());
        if let (Some(first), Some(last)) = (stations.first(), stations.last()) {
            let first: Arc<dyn Location> = Arc::new(first.clone());
            let last: Arc<dyn Location> = Arc::new(last.clone());
            workers.push(Arc::new(Engine::new(n - 1, shaft.clone(), first)));
            workers.push(Arc::new(Engine::new(n, last, shaft)));
        }
        let consumer = Consumer::new(0, elevator.clone());
        let departures = consumer.departures();
        workers.push(Arc::new(Producer::new(0, elevator.clone())));
        workers.push(Arc::new(consumer));
        workers.push(Arc::new(Operator::new(0, elevator.clone())));

        let context = WorkerContext::new(CancellationToken::new(), config.timings())
            .with_pauses(collaborators.pauses)
            .with_sink(collaborators.sink)
            .with_observer(collaborators.observer);

        info!(stations = n, workers = workers.len(), "Mine built");

        Ok(Self {
            elevator,
            stations,
            workers,
            departures,
            progress,
            context,
            join_timeout: config.join_timeout(),
            started: false,
            running: Vec::new(),
            location_handles,
        })
    }

    /// Spawns every worker in its own task.
    pub fn start_all(&mut self) -> Result<(), LifecycleError> {
        if self.started {
            return Err(LifecycleError::AlreadyStarted);
        }
        self.started = true;

        for worker in &self.workers {
            let token = worker.token();
            let worker = Arc::clone(worker);
            let context = self.context.clone();
            let handle = tokio::spawn(
                async move { worker.run(context).await }.instrument(info_span!("worker", id = %token)),
            );
            self.running.push((token, handle));
        }

        info!(workers = self.running.len(), "Workers started");
        Ok(())
    }

    /// Cancels every worker and waits for each one up to the join timeout.
    ///
    /// A worker that does not stop in time is aborted and listed in
    /// [`ShutdownReport::timed_out`]. A worker that failed or panicked is
    /// reported as an error once all workers have been dealt with.
    pub async fn stop_all(&mut self) -> Result<ShutdownReport, LifecycleError> {
        info!(workers = self.running.len(), "Stopping workers");
        self.context.shutdown.cancel();

        let mut report = ShutdownReport::default();
        let mut failure = None;

        for (token, mut handle) in std::mem::take(&mut self.running) {
            match tokio::time::timeout(self.join_timeout, &mut handle).await {
                Ok(Ok(Ok(()))) => report.joined.push(token),
                Ok(Ok(Err(source))) => {
                    error!(worker = %token, error = %source, "Worker failed");
                    report.joined.push(token);
                    failure.get_or_insert(LifecycleError::WorkerFailed { worker: token, source });
                }
                Ok(Err(join_error)) => {
                    error!(worker = %token, error = %join_error, "Worker panicked");
                    failure.get_or_insert(LifecycleError::WorkerPanicked {
                        worker: token,
                        message: join_error.to_string(),
                    });
                }
                Err(_) => {
                    warn!(worker = %token, timeout = ?self.join_timeout, "Worker did not stop in time, aborting");
                    handle.abort();
                    report.timed_out.push(token);
                }
            }
        }

        match failure {
            Some(error) => Err(error),
            None => {
                info!(
                    joined = report.joined.len(),
                    timed_out = report.timed_out.len(),
                    "Workers stopped"
                );
                Ok(report)
            }
        }
    }

    /// Stops the workers, then closes and joins the location actors.
    ///
    /// # Shutdown Process
    ///
    /// Dropping every client closes the location channels. Each
    /// `LocationActor` then leaves its loop and its task completes.
    pub async fn shutdown(mut self) -> Result<ShutdownReport, LifecycleError> {
        info!("Shutting down mine...");
        let report = self.stop_all().await;

        let MineSystem {
            elevator,
            stations,
            workers,
            location_handles,
            join_timeout,
            ..
        } = self;
        drop(workers);
        drop(elevator);
        drop(stations);

        for handle in location_handles {
            match tokio::time::timeout(join_timeout, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!(error = %e, "Location task failed"),
                Err(_) => warn!(timeout = ?join_timeout, "Location did not close in time"),
            }
        }

        info!("Mine shut down");
        report
    }

    pub fn elevator(&self) -> &ElevatorClient {
        &self.elevator
    }

    pub fn stations(&self) -> &[StationClient] {
        &self.stations
    }

    /// Live departure statistics of the consumer.
    pub fn departures(&self) -> watch::Receiver<Departures> {
        self.departures.clone()
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Tokens of every worker, in start order.
    pub fn workers(&self) -> Vec<ActorToken> {
        self.workers.iter().map(|worker| worker.token()).collect()
    }

    /// Workers whose next operation could not proceed right now.
    pub fn blocked_workers(&self) -> Vec<ActorToken> {
        self.workers
            .iter()
            .filter(|worker| !worker.can_proceed())
            .map(|worker| worker.token())
            .collect()
    }

    /// The token cancelled by `stop_all`.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.context.shutdown.clone()
    }

    /// A watchdog over this mine's progress counter.
    pub fn watchdog(&self, stall_limit: Duration) -> Watchdog {
        Watchdog::new(self.progress.clone(), stall_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::ActorRole;
    use async_trait::async_trait;

    enum Behaviour {
        StopOnCancel,
        Fail,
        Panic,
        IgnoreCancel,
    }

    struct StubWorker {
        token: ActorToken,
        behaviour: Behaviour,
    }

    #[async_trait]
    impl Worker for StubWorker {
        fn token(&self) -> ActorToken {
            self.token
        }

        fn can_proceed(&self) -> bool {
            true
        }

        async fn run(&self, ctx: WorkerContext) -> Result<(), HandoffError> {
            match self.behaviour {
                Behaviour::StopOnCancel => {
                    ctx.shutdown.cancelled().await;
                    Ok(())
                }
                Behaviour::Fail => Err(HandoffError::LocationClosed),
                Behaviour::Panic => panic!("worker crashed"),
                Behaviour::IgnoreCancel => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(())
                }
            }
        }
    }

    fn mine_with(stubs: Vec<(usize, Behaviour)>) -> MineSystem {
        let config = MineConfig {
            stations: 1,
            join_timeout_ms: 50,
            ..MineConfig::default()
        };
        let mut mine = MineSystem::build(&config, Collaborators::default()).unwrap();
        mine.workers = stubs
            .into_iter()
            .map(|(instance, behaviour)| {
                Arc::new(StubWorker {
                    token: ActorToken::new(ActorRole::Engine, instance),
                    behaviour,
                }) as Arc<dyn Worker>
            })
            .collect();
        mine
    }

    fn engine(instance: usize) -> ActorToken {
        ActorToken::new(ActorRole::Engine, instance)
    }

    #[tokio::test]
    async fn test_stuck_worker_is_aborted_and_reported() {
        let mut mine = mine_with(vec![(0, Behaviour::IgnoreCancel), (1, Behaviour::StopOnCancel)]);
        mine.start_all().unwrap();

        let report = mine.stop_all().await.unwrap();

        assert_eq!(report.timed_out, vec![engine(0)]);
        assert_eq!(report.joined, vec![engine(1)]);
    }

    #[tokio::test]
    async fn test_failed_worker_is_reported_as_error() {
        let mut mine = mine_with(vec![(3, Behaviour::Fail), (4, Behaviour::StopOnCancel)]);
        mine.start_all().unwrap();

        let result = mine.stop_all().await;

        assert!(matches!(
            result,
            Err(LifecycleError::WorkerFailed {
                worker,
                source: HandoffError::LocationClosed,
            }) if worker == engine(3)
        ));
    }

    #[tokio::test]
    async fn test_panicked_worker_is_reported_as_error() {
        let mut mine = mine_with(vec![(2, Behaviour::Panic)]);
        mine.start_all().unwrap();

        match mine.stop_all().await {
            Err(LifecycleError::WorkerPanicked { worker, message }) => {
                assert_eq!(worker, engine(2));
                assert!(message.contains("panic"), "Unexpected message: {message}");
            }
            other => panic!("Expected WorkerPanicked, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_first_failure_is_reported() {
        let mut mine = mine_with(vec![
            (0, Behaviour::Fail),
            (1, Behaviour::Panic),
            (2, Behaviour::IgnoreCancel),
        ]);
        mine.start_all().unwrap();

        let result = mine.stop_all().await;

        assert!(matches!(
            result,
            Err(LifecycleError::WorkerFailed { worker, .. }) if worker == engine(0)
        ));
        assert!(mine.running.is_empty());
    }
}
