//! Pure data structures: carts and the state owned by each location.

pub mod cart;
pub mod elevator;
pub mod station;

pub use cart::*;
pub use elevator::*;
pub use station::*;
