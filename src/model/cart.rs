//! A cart circulating through the mine.
//!
//! # Ownership
//! `Cart` is not `Clone`. Every handoff moves the value from one owner to the
//! next (actor → location → actor), and a cart is never in two places at once.
//!
//! The cargo counter only goes up, through the crate-private `load_cargo`,
//! which a station calls from `collect` when cargo is present.
use serde::{Deserialize, Serialize};

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

/// Type-safe identifier for Carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CartId(pub u64);

impl From<u64> for CartId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Cart {
    id: CartId,
    cargo: u32,
}

impl Cart {
    pub fn id(&self) -> CartId {
        self.id
    }

    /// Units of cargo loaded so far.
    pub fn cargo(&self) -> u32 {
        self.cargo
    }

    pub(crate) fn load_cargo(&mut self) {
        self.cargo += 1;
    }
}

impl Display for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart [{}] ({})", self.id, self.cargo)
    }
}

/// Hands out fresh carts with strictly increasing ids, starting at 1.
#[derive(Debug)]
pub struct CartFactory {
    next_id: AtomicU64,
}

impl CartFactory {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
        }
    }

    pub fn next_cart(&self) -> Cart {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Cart {
            id: CartId(id),
            cargo: 0,
        }
    }
}

impl Default for CartFactory {
    fn default() -> Self {
        Self::new()
    }
}
