//! # Framework Errors
//!
//! Errors raised by the location plumbing itself. A location never refuses a
//! well-formed request (it waits instead), so the only failures are the
//! location actor being gone.

/// Errors that can occur while handing a cart to or from a location.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum HandoffError {
    #[error("Location closed")]
    LocationClosed,
    #[error("Location dropped the request")]
    RequestDropped,
}
