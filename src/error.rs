use std::collections::TryReserveError;
use thiserror::Error;

/// The global allocator refused to hand out memory for a list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to allocate a list node")]
pub struct AllocError;

/// Errors reported by [`Queue`](crate::Queue) operations.
///
/// A failed operation never leaves a partially linked node behind: the
/// queue is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The node that would hold the element could not be allocated.
    #[error(transparent)]
    Node(#[from] AllocError),
    /// The element text could not be copied.
    #[error("failed to copy element text: {0}")]
    Text(#[from] TryReserveError),
    /// The operation needs at least one element.
    #[error("the queue is empty")]
    Empty,
}
