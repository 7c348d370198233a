use thiserror::Error;

/// Attach-time errors reported to the caller, never swallowed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    /// The weak reference was already dead when attach was called.
    #[error("cannot attach a dead render object")]
    DeadObject,

    /// Bounded mode only: the pre-sized slot store is full.
    #[error("render chain is full (limit {limit})")]
    CapacityExhausted { limit: usize },
}

/// Render object construction and draw failures.
///
/// These never cross the chain dispatch boundary upward; the chain logs them
/// and continues with the next object.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A resource was resolved but its geometry is unusable.
    #[error("bad resource: {0}")]
    BadResource(String),

    /// A model produced no drawable geometry.
    #[error("model {0:?} has no mesh segments")]
    EmptyModel(String),
}
