use thiserror::Error;

/// A failure inside an event listener.
///
/// Listener failures are isolated by the bus: the error is logged and the
/// remaining listeners for the event still run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenerError {
    /// The listener could not process the event
    #[error("Listener failed: {reason}")]
    Failed { reason: String },
}
