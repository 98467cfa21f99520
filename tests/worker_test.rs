use std::sync::Arc;
use std::time::Duration;

use mine_sim::clients::{ElevatorClient, StationClient};
use mine_sim::config::Timings;
use mine_sim::framework::LocationContext;
use mine_sim::model::{CartFactory, CartId, Position};
use mine_sim::pause::SequencePauses;
use mine_sim::progress::Progress;
use mine_sim::sink::RecordingSink;
use mine_sim::workers::{Consumer, Miner, Operator, Producer, Worker, WorkerContext};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

struct Fixture {
    sink: Arc<RecordingSink>,
    progress: Progress,
    shutdown: CancellationToken,
}

impl Fixture {
    fn new() -> Self {
        Self {
            sink: Arc::new(RecordingSink::new()),
            progress: Progress::new(),
            shutdown: CancellationToken::new(),
        }
    }

    fn elevator(&self) -> ElevatorClient {
        let (actor, client) = mine_sim::elevator_actor::new(8);
        tokio::spawn(actor.run(LocationContext::new(self.sink.clone(), self.progress.clone())));
        client
    }

    fn station(&self, id: usize) -> StationClient {
        let (actor, client) = mine_sim::station_actor::new(id, 8);
        tokio::spawn(actor.run(LocationContext::new(self.sink.clone(), self.progress.clone())));
        client
    }

    fn context(&self, timings: Timings, pause: Duration) -> WorkerContext {
        WorkerContext::new(self.shutdown.clone(), timings)
            .with_pauses(Arc::new(SequencePauses::uniform(pause)))
            .with_sink(self.sink.clone())
    }
}

fn fast() -> Timings {
    Timings {
        mining: Duration::from_millis(5),
        elevator_cycle: Duration::from_millis(5),
        transit: Duration::from_millis(5),
    }
}

async fn eventually(mut condition: impl FnMut() -> bool) {
    timeout(Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("Condition not reached in time");
}

#[tokio::test]
async fn test_producer_sends_new_cart_down() {
    let fixture = Fixture::new();
    let elevator = fixture.elevator();
    let producer = Arc::new(Producer::new(0, elevator.clone()));
    assert!(producer.can_proceed());

    let ctx = fixture.context(fast(), Duration::from_secs(60));
    let handle = tokio::spawn({
        let producer = producer.clone();
        async move { producer.run(ctx).await }
    });

    eventually(|| elevator.snapshot().cart.is_some()).await;
    assert_eq!(elevator.snapshot().position, Position::Bottom);
    assert_eq!(elevator.snapshot().cart, Some(CartId(1)));
    assert!(!producer.can_proceed());
    assert_eq!(
        fixture.sink.messages_for("PRODUCER"),
        vec!["cart [1] (0) arrives at the mine"]
    );

    fixture.shutdown.cancel();
    assert_eq!(handle.await.unwrap(), Ok(()));
}

#[tokio::test]
async fn test_consumer_records_departures() {
    let fixture = Fixture::new();
    let elevator = fixture.elevator();
    elevator.operate_empty().await.unwrap();
    elevator.deliver(CartFactory::new().next_cart()).await.unwrap();

    let consumer = Arc::new(Consumer::new(0, elevator.clone()));
    assert!(consumer.can_proceed());
    let mut departures = consumer.departures();

    let ctx = fixture.context(fast(), Duration::ZERO);
    let handle = tokio::spawn({
        let consumer = consumer.clone();
        async move { consumer.run(ctx).await }
    });

    let stats = *timeout(Duration::from_secs(1), departures.wait_for(|d| d.count == 1))
        .await
        .expect("Cart should depart")
        .unwrap();
    assert_eq!(stats.last, Some((CartId(1), 0)));
    assert_eq!(
        fixture.sink.messages_for("CONSUMER"),
        vec!["cart [1] (0) departs from mine"]
    );
    assert!(elevator.snapshot().is_empty());

    fixture.shutdown.cancel();
    assert_eq!(handle.await.unwrap(), Ok(()));
}

#[tokio::test]
async fn test_operator_cycles_empty_elevator() {
    let fixture = Fixture::new();
    let elevator = fixture.elevator();
    let operator = Arc::new(Operator::new(0, elevator.clone()));

    let ctx = fixture.context(fast(), Duration::ZERO);
    let handle = tokio::spawn({
        let operator = operator.clone();
        async move { operator.run(ctx).await }
    });

    let sink = fixture.sink.clone();
    eventually(|| sink.messages_for("ELEVATOR").len() >= 2).await;
    let messages = fixture.sink.messages_for("ELEVATOR");
    assert_eq!(messages[0], "descends (empty)");
    assert_eq!(messages[1], "ascends (empty)");

    fixture.shutdown.cancel();
    assert_eq!(handle.await.unwrap(), Ok(()));
}

#[tokio::test]
async fn test_miner_deposits_at_its_station() {
    let fixture = Fixture::new();
    let station = fixture.station(2);
    let miner = Arc::new(Miner::new(station.clone()));
    assert_eq!(miner.token().to_string(), "MINER_2");
    assert!(miner.can_proceed());

    let ctx = fixture.context(fast(), Duration::ZERO);
    let handle = tokio::spawn({
        let miner = miner.clone();
        async move { miner.run(ctx).await }
    });

    eventually(|| station.snapshot().cargo_present).await;
    assert!(!miner.can_proceed());

    // The miner is now waiting on the station; cancellation must still stop it.
    fixture.shutdown.cancel();
    let result = timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
    assert_eq!(result, Ok(()));
    assert!(station.snapshot().cargo_present);
}
