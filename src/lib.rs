#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Mine Simulator
//!
//! > **A closed loop of carts, shared locations and independent workers.**
//!
//! Empty carts enter the mine at the top of an elevator shaft, ride down,
//! visit every station in turn picking up one unit of cargo at each, ride
//! back up and leave. Every piece of shared state (the elevator, each
//! station) is a *location*, and every active part (producer, consumer,
//! operator, miners, engines) is a *worker* running its own loop.
//!
//! ```text
//! Producer → Elevator(top) ↓ Elevator(bottom) → Engine → Station 0 → Engine → ...
//!     ... → Station n-1 → Engine → Elevator(bottom) ↑ Elevator(top) → Consumer
//! ```
//!
//! ## Core Concepts
//!
//! ### Locations are actors
//! A location is served by a [`LocationActor`](framework::LocationActor) that
//! owns its state outright. Operations arrive over a channel and are applied
//! one at a time. An operation whose precondition does not hold (collecting
//! from an empty station, say) is parked and re-tested after every later
//! change, so callers simply wait.
//!
//! ### Workers are tasks
//! Each worker is a tokio task sharing a cancellation token. Cancellation
//! interrupts any sleep and any pending location operation; an abandoned
//! operation never takes effect.
//!
//! ### Carts cannot be copied
//! [`Cart`](model::Cart) is neither `Clone` nor `Copy`, and each location
//! holds at most one in an `Option`. A cart is always in exactly one place.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic location actor, client and messages.
//! - **Key items**: [`LocationEntity`](framework::LocationEntity), [`LocationActor`](framework::LocationActor).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! Builds, starts and stops a whole mine.
//! - **Key items**: [`MineSystem`](lifecycle::MineSystem), [`shutdown`](lifecycle::MineSystem::shutdown).
//!
//! ### 3. The Interface ([`clients`])
//! Domain clients over the generic client, and the [`Location`](clients::Location)
//! trait engines move carts between.
//!
//! ### 4. The Locations ([`elevator_actor`], [`station_actor`])
//! Request types and `LocationEntity` implementations.
//!
//! ### 5. The Workers ([`workers`])
//! Producer, consumer, operator, miners and engines.
//!
//! ### Supporting modules
//! [`model`] (pure state), [`config`], [`pause`], [`sink`], [`observer`],
//! [`progress`].
//!
//! ## Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod elevator_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod observer;
pub mod pause;
pub mod progress;
pub mod sink;
pub mod station_actor;
pub mod workers;
