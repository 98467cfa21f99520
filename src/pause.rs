//! # Pause Sources
//!
//! Actors pause between iterations for a duration chosen by a
//! [`PauseSource`]. The pauses only throttle throughput; nothing about the
//! correctness of the mine depends on them.
//!
//! - [`RandomPauses`] draws each pause uniformly from `[0, max)`.
//! - [`SequencePauses`] replays fixed sequences, for deterministic runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rand::Rng;

/// Supplies the pause an actor takes after each iteration.
pub trait PauseSource: Send + Sync {
    /// Producer, after a cart has arrived.
    fn arrival_pause(&self) -> Duration;
    /// Consumer, after a cart has departed.
    fn departure_pause(&self) -> Duration;
    /// Operator, after moving the empty elevator.
    fn operator_pause(&self) -> Duration;
    /// Miner, after depositing cargo.
    fn miner_pause(&self) -> Duration;
}

/// Upper bounds (exclusive) for each pause category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseBounds {
    pub max_arrival: Duration,
    pub max_departure: Duration,
    pub max_operator: Duration,
    pub max_miner: Duration,
}

impl Default for PauseBounds {
    fn default() -> Self {
        Self {
            max_arrival: Duration::from_millis(200),
            max_departure: Duration::from_millis(800),
            max_operator: Duration::from_millis(200),
            max_miner: Duration::from_millis(200),
        }
    }
}

/// Uniformly random pauses in `[0, max)` per category.
#[derive(Debug, Clone, Default)]
pub struct RandomPauses {
    bounds: PauseBounds,
}

impl RandomPauses {
    pub fn new(bounds: PauseBounds) -> Self {
        Self { bounds }
    }

    fn below(max: Duration) -> Duration {
        let max_ms = max.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
    }
}

impl PauseSource for RandomPauses {
    fn arrival_pause(&self) -> Duration {
        Self::below(self.bounds.max_arrival)
    }

    fn departure_pause(&self) -> Duration {
        Self::below(self.bounds.max_departure)
    }

    fn operator_pause(&self) -> Duration {
        Self::below(self.bounds.max_operator)
    }

    fn miner_pause(&self) -> Duration {
        Self::below(self.bounds.max_miner)
    }
}

/// One replayed category: its values and how far it has been read.
#[derive(Debug, Default)]
struct Replay {
    values: Vec<Duration>,
    next: AtomicUsize,
}

impl Replay {
    fn new(values: Vec<Duration>) -> Self {
        Self {
            values,
            next: AtomicUsize::new(0),
        }
    }

    /// Next value; the last one repeats once the sequence runs out.
    fn next(&self) -> Duration {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        match self.values.get(index).or_else(|| self.values.last()) {
            Some(value) => *value,
            None => Duration::ZERO,
        }
    }
}

/// Replays fixed pause sequences per category.
///
/// A category shared by several actors (all miners use `miner_pause`) is read
/// in whatever order those actors ask for it.
#[derive(Debug, Default)]
pub struct SequencePauses {
    arrival: Replay,
    departure: Replay,
    operator: Replay,
    miner: Replay,
}

impl SequencePauses {
    pub fn new(
        arrival: Vec<Duration>,
        departure: Vec<Duration>,
        operator: Vec<Duration>,
        miner: Vec<Duration>,
    ) -> Self {
        Self {
            arrival: Replay::new(arrival),
            departure: Replay::new(departure),
            operator: Replay::new(operator),
            miner: Replay::new(miner),
        }
    }

    /// The same single pause for every category, forever.
    pub fn uniform(pause: Duration) -> Self {
        Self::new(vec![pause], vec![pause], vec![pause], vec![pause])
    }
}

impl PauseSource for SequencePauses {
    fn arrival_pause(&self) -> Duration {
        self.arrival.next()
    }

    fn departure_pause(&self) -> Duration {
        self.departure.next()
    }

    fn operator_pause(&self) -> Duration {
        self.operator.next()
    }

    fn miner_pause(&self) -> Duration {
        self.miner.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(values: &[u64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_millis).collect()
    }

    #[test]
    fn test_sequence_replays_then_repeats_last() {
        let pauses = SequencePauses::new(ms(&[5, 10, 15]), vec![], vec![], vec![]);

        let replayed: Vec<Duration> = (0..5).map(|_| pauses.arrival_pause()).collect();

        assert_eq!(replayed, ms(&[5, 10, 15, 15, 15]));
    }

    #[test]
    fn test_empty_sequence_yields_zero() {
        let pauses = SequencePauses::default();
        assert_eq!(pauses.departure_pause(), Duration::ZERO);
        assert_eq!(pauses.miner_pause(), Duration::ZERO);
    }

    #[test]
    fn test_categories_are_independent() {
        let pauses = SequencePauses::new(ms(&[1]), ms(&[2]), ms(&[3]), ms(&[4, 5]));
        assert_eq!(pauses.miner_pause(), Duration::from_millis(4));
        assert_eq!(pauses.operator_pause(), Duration::from_millis(3));
        assert_eq!(pauses.miner_pause(), Duration::from_millis(5));
        assert_eq!(pauses.arrival_pause(), Duration::from_millis(1));
    }

    #[test]
    fn test_random_pauses_stay_below_bounds() {
        let pauses = RandomPauses::new(PauseBounds {
            max_arrival: Duration::from_millis(10),
            max_departure: Duration::from_millis(1),
            max_operator: Duration::ZERO,
            max_miner: Duration::from_millis(50),
        });

        for _ in 0..200 {
            assert!(pauses.arrival_pause() < Duration::from_millis(10));
            assert_eq!(pauses.departure_pause(), Duration::ZERO);
            assert_eq!(pauses.operator_pause(), Duration::ZERO);
            assert!(pauses.miner_pause() < Duration::from_millis(50));
        }
    }
}
