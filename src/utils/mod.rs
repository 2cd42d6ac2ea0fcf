//! Utility helpers: id allocation, logging timers, cancellation.

pub mod allocator;
pub mod cancel;
pub mod logging;

pub use allocator::{Arena, EntityId};
pub use cancel::CancellationToken;
