//! # Actor Tokens & Loop Observer
//!
//! Every actor carries an [`ActorToken`] naming its role and instance, e.g.
//! `ENGINE_5`. At the top of each loop iteration the actor hands its token to
//! a [`LoopObserver`]. The default [`NoopObserver`] returns at once; a test
//! harness can install one that holds actors back to force particular
//! interleavings.

use std::fmt::Display;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorRole {
    Producer,
    Consumer,
    Operator,
    Miner,
    Engine,
}

impl Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActorRole::Producer => "PRODUCER",
            ActorRole::Consumer => "CONSUMER",
            ActorRole::Operator => "OPERATOR",
            ActorRole::Miner => "MINER",
            ActorRole::Engine => "ENGINE",
        };
        write!(f, "{name}")
    }
}

/// Immutable identity of one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorToken {
    pub role: ActorRole,
    pub instance: usize,
}

impl ActorToken {
    pub fn new(role: ActorRole, instance: usize) -> Self {
        Self { role, instance }
    }
}

impl Display for ActorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.role, self.instance)
    }
}

/// Called by every actor at the top of each loop iteration.
#[async_trait]
pub trait LoopObserver: Send + Sync {
    async fn on_loop_iteration(&self, _token: &ActorToken) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LoopObserver for NoopObserver {}
