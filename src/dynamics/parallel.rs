use rayon::prelude::*;

use crate::core::body::Body;
use crate::utils::allocator::EntityId;

/// Runs `step` over every body on the rayon pool.
///
/// Results come back in body order regardless of scheduling, so callers can
/// emit notifications deterministically.
pub fn map_bodies<F, R>(bodies: &mut [Body], step: F) -> Vec<R>
where
    F: Fn(EntityId, &mut Body) -> R + Sync + Send,
    R: Send,
{
    bodies
        .par_iter_mut()
        .enumerate()
        .map(|(index, body)| step(EntityId::from_index(index), body))
        .collect()
}
