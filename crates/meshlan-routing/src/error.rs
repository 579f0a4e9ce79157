//! Routing layer error types.

/// Failure outcome delivered through a write completion.
///
/// A dropped frame is not an error: drops are silent and deliver no
/// outcome at all. Only failures of a selected destination port reach
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("port write queue is full")]
    Backlogged,

    #[error("port is closed")]
    PortClosed,

    #[error("transport error: {0}")]
    Transport(String),
}
