//! State of a processing station.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::cart::{Cart, CartId};

/// Type-safe identifier for Stations (their index along the line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationId(pub usize);

impl From<usize> for StationId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationSnapshot {
    pub id: StationId,
    pub cart: Option<CartId>,
    pub cargo_present: bool,
}

impl StationSnapshot {
    pub fn can_collect(&self) -> bool {
        self.cart.is_some() && self.cargo_present
    }

    pub fn can_deliver(&self) -> bool {
        self.cart.is_none()
    }

    pub fn can_deposit_cargo(&self) -> bool {
        !self.cargo_present
    }
}

/// A station holds at most one cart and at most one unit of cargo.
///
/// Cargo moves onto a cart only in [`Station::try_collect`], and a cart is only
/// released once it can take cargo with it.
#[derive(Debug)]
pub struct Station {
    id: StationId,
    slot: Option<Cart>,
    cargo_present: bool,
}

impl Station {
    pub fn new(id: impl Into<StationId>) -> Self {
        Self {
            id: id.into(),
            slot: None,
            cargo_present: false,
        }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn cart(&self) -> Option<&Cart> {
        self.slot.as_ref()
    }

    pub fn has_cargo(&self) -> bool {
        self.cargo_present
    }

    pub fn snapshot(&self) -> StationSnapshot {
        StationSnapshot {
            id: self.id,
            cart: self.slot.as_ref().map(Cart::id),
            cargo_present: self.cargo_present,
        }
    }

    /// Releases the waiting cart with one unit of cargo loaded.
    pub fn try_collect(&mut self) -> Option<Cart> {
        if !self.snapshot().can_collect() {
            return None;
        }
        let mut cart = self.slot.take()?;
        cart.load_cargo();
        self.cargo_present = false;
        Some(cart)
    }

    pub fn try_deliver(&mut self, cart: Cart) -> Result<(), Cart> {
        if !self.snapshot().can_deliver() {
            return Err(cart);
        }
        self.slot = Some(cart);
        Ok(())
    }

    pub fn try_deposit_cargo(&mut self) -> bool {
        if !self.snapshot().can_deposit_cargo() {
            return false;
        }
        self.cargo_present = true;
        true
    }
}

impl Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "station {}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CartFactory;

    #[test]
    fn test_deposit_deliver_collect_loads_one_unit() {
        let factory = CartFactory::new();
        let mut station = Station::new(0);

        assert!(station.try_deposit_cargo());
        station.try_deliver(factory.next_cart()).unwrap();
        let cart = station.try_collect().unwrap();

        assert_eq!(cart.cargo(), 1);
        assert!(station.cart().is_none());
        assert!(!station.has_cargo());
    }

    #[test]
    fn test_collect_refused_without_cargo() {
        let factory = CartFactory::new();
        let mut station = Station::new(1);
        station.try_deliver(factory.next_cart()).unwrap();

        assert!(station.try_collect().is_none());
        assert_eq!(station.cart().map(Cart::cargo), Some(0));
    }

    #[test]
    fn test_deliver_refused_when_occupied() {
        let factory = CartFactory::new();
        let mut station = Station::new(2);
        station.try_deliver(factory.next_cart()).unwrap();

        let refused = station.try_deliver(factory.next_cart()).unwrap_err();
        assert_eq!(refused.id(), CartId(2));
        assert_eq!(station.cart().map(Cart::id), Some(CartId(1)));
    }

    #[test]
    fn test_second_deposit_refused_until_collected() {
        let factory = CartFactory::new();
        let mut station = Station::new(3);
        assert!(station.try_deposit_cargo());
        assert!(!station.try_deposit_cargo());

        station.try_deliver(factory.next_cart()).unwrap();
        station.try_collect().unwrap();
        assert!(station.try_deposit_cargo());
    }

    #[test]
    fn test_cargo_accumulates_across_stations() {
        let factory = CartFactory::new();
        let mut cart = factory.next_cart();
        for i in 0..3 {
            let mut station = Station::new(i);
            station.try_deposit_cargo();
            station.try_deliver(cart).unwrap();
            cart = station.try_collect().unwrap();
        }
        assert_eq!(cart.cargo(), 3);
        assert_eq!(Station::new(3).to_string(), "station 3");
    }
}
