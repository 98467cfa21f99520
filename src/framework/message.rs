//! # Generic Messages
//!
//! Types shared by every location actor and its client: the oneshot reply
//! channel, the outcome of trying to serve a request, and the hook the actor
//! uses to drop requests nobody is waiting for any more.

use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by location actors.
pub type Response<T> = oneshot::Sender<T>;

/// Deferred delivery of a reply to the caller.
///
/// The actor publishes the new snapshot first and only then runs the reply,
/// so a caller that resumes always observes the state its own operation left
/// behind. Returns `false` if the caller was no longer there to receive it.
pub type Reply = Box<dyn FnOnce() -> bool + Send>;

/// Outcome of offering a request to a location.
pub enum Served<R> {
    /// The precondition held, the state changed, and the reply is ready.
    Done(Reply),
    /// The precondition does not hold yet. The request is handed back
    /// untouched and will be offered again after the next state change.
    Blocked(R),
}

impl<R> Served<R> {
    /// Completes a request by sending `value` to its caller.
    pub fn reply<T: Send + 'static>(respond_to: Response<T>, value: T) -> Self {
        // The operation is committed either way and is not rolled back.
        Served::Done(Box::new(move || respond_to.send(value).is_ok()))
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for Served<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Served::Done(_) => write!(f, "Done"),
            Served::Blocked(request) => f.debug_tuple("Blocked").field(request).finish(),
        }
    }
}

/// A request that may outlive interest in its answer.
pub trait PendingRequest: Send + 'static {
    /// True once the caller has stopped waiting (its future was dropped,
    /// typically because the calling worker was cancelled).
    fn is_abandoned(&self) -> bool;
}
