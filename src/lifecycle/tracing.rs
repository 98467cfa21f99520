//! # Observability & Tracing
//!
//! This module provides the tracing setup for the whole mine.
//!
//! ## Overview
//!
//! [`setup_tracing`] installs a `tracing-subscriber` fmt layer filtered by
//! `RUST_LOG`. Two kinds of events end up there:
//!
//! - **Domain events**, recorded through the [`TracingSink`](crate::sink::TracingSink)
//!   at `INFO` with a `component` field (`ELEVATOR`, `STATION-2`, `PRODUCER`, ...).
//! - **Runtime events** from location actors, clients and workers: startup,
//!   shutdown, parked requests, abandoned requests.
//!
//! The format is compact and hides the module path (`with_target(false)`).
//! Each worker runs inside a `worker` span carrying its token, so its events
//! read like `worker{id=ENGINE_3}: Collected cart=7 origin="station 2"`.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Cart movements only
//! RUST_LOG=info cargo run
//!
//! # Also every request, every iteration and every parked request
//! RUST_LOG=debug cargo run
//!
//! # Only the location plumbing
//! RUST_LOG=mine_sim::framework=debug cargo run
//! ```
//!
//! ## Sample Output
//!
//! ```text
//! INFO worker{id=PRODUCER_0}: cart [1] (0) arrives at the mine component="PRODUCER"
//! INFO worker{id=PRODUCER_0}:arrive{cart=1}: descends with cart [1] (0) component="ELEVATOR"
//! INFO cart [1] (0) collected from elevator component="ELEVATOR"
//! INFO cart [1] (0) delivered to station 0 component="STATION-0"
//! INFO cart [1] (1) loaded with cargo component="STATION-0"
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Components are carried as a field instead
        .compact()
        .init();
}
