//! Obstacle collision detection and the velocity-reversal response.

use serde::{Deserialize, Serialize};

use crate::config::COLLISION_RESPONSE_FACTOR;
use crate::core::{body::Body, obstacle::Obstacle, vector::Vector};
use crate::error::Result;
use crate::utils::allocator::{Arena, EntityId};

/// One body touching one obstacle at the end of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub body: EntityId,
    pub identifier: String,
    pub obstacle: EntityId,
    /// 1-based index of the step that produced the contact.
    pub step: usize,
}

/// Reverses and halves `velocity`.
pub fn respond(velocity: &mut Vector) {
    *velocity = velocity.scale(COLLISION_RESPONSE_FACTOR);
}

/// Tests `body` against every obstacle in insertion order, responding once per
/// hit, and returns the ids of the obstacles that were hit.
///
/// Hits compound: touching two obstacles in the same step scales the velocity
/// by `0.25`, not `-0.5`.
pub fn detect_and_respond(body: &mut Body, obstacles: &Arena<Obstacle>) -> Result<Vec<EntityId>> {
    let mut hits = Vec::new();
    for (id, obstacle) in obstacles.iter_with_ids() {
        if obstacle.check_collision(body)? {
            respond(&mut body.velocity);
            hits.push(id);
        }
    }
    Ok(hits)
}
