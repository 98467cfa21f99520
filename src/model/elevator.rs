//! State of the elevator shaft.
//!
//! [`Elevator`] is plain data plus non-blocking `try_*` transitions. The
//! blocking contract (wait until the precondition holds) is provided by the
//! elevator's location actor, see [`crate::elevator_actor`].

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::cart::{Cart, CartId};

/// Where the elevator car currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Top,
    Bottom,
}

impl Position {
    pub fn flipped(self) -> Self {
        match self {
            Position::Top => Position::Bottom,
            Position::Bottom => Position::Top,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Top => write!(f, "top"),
            Position::Bottom => write!(f, "bottom"),
        }
    }
}

/// Read-only view of an elevator, published after every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatorSnapshot {
    pub position: Position,
    pub cart: Option<CartId>,
}

impl ElevatorSnapshot {
    pub fn is_empty(&self) -> bool {
        self.cart.is_none()
    }

    pub fn can_arrive(&self) -> bool {
        self.is_empty() && self.position == Position::Top
    }

    pub fn can_depart(&self) -> bool {
        !self.is_empty() && self.position == Position::Top
    }

    pub fn can_collect_from_bottom(&self) -> bool {
        !self.is_empty() && self.position == Position::Bottom
    }

    pub fn can_deliver_to_bottom(&self) -> bool {
        self.is_empty() && self.position == Position::Bottom
    }

    pub fn can_operate_empty(&self) -> bool {
        self.is_empty()
    }
}

/// The elevator: a two-position shuttle holding at most one cart.
#[derive(Debug)]
pub struct Elevator {
    position: Position,
    slot: Option<Cart>,
}

impl Elevator {
    /// A fresh elevator waits empty at the top of the shaft.
    pub fn new() -> Self {
        Self {
            position: Position::Top,
            slot: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn cart(&self) -> Option<&Cart> {
        self.slot.as_ref()
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            position: self.position,
            cart: self.slot.as_ref().map(Cart::id),
        }
    }

    /// Moves the car to the other end of the shaft, loaded or not.
    pub fn operate(&mut self) -> Position {
        self.position = self.position.flipped();
        self.position
    }

    pub fn try_operate_empty(&mut self) -> Option<Position> {
        if !self.snapshot().can_operate_empty() {
            return None;
        }
        Some(self.operate())
    }

    /// Loads `cart` at the top and sends it down. Hands the cart back if the
    /// elevator is not waiting empty at the top.
    pub fn try_arrive(&mut self, cart: Cart) -> Result<Position, Cart> {
        if !self.snapshot().can_arrive() {
            return Err(cart);
        }
        self.slot = Some(cart);
        Ok(self.operate())
    }

    pub fn try_depart(&mut self) -> Option<Cart> {
        if !self.snapshot().can_depart() {
            return None;
        }
        self.slot.take()
    }

    pub fn try_collect(&mut self) -> Option<Cart> {
        if !self.snapshot().can_collect_from_bottom() {
            return None;
        }
        self.slot.take()
    }

    /// Loads `cart` at the bottom and sends it up.
    pub fn try_deliver(&mut self, cart: Cart) -> Result<Position, Cart> {
        if !self.snapshot().can_deliver_to_bottom() {
            return Err(cart);
        }
        self.slot = Some(cart);
        Ok(self.operate())
    }
}

impl Default for Elevator {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Elevator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "elevator")
    }
}
