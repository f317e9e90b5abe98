//! Conversion between `hecs::Entity` and the `u64` ids used outside the ECS.
//!
//! Ids are relations only. Every use re-resolves them against the world, so an
//! id whose entity was despawned simply fails to resolve.

use hecs::{Entity, World};

/// Stable id for an entity, as exposed in commands, snapshots and AI targets.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Resolve an id back to a live entity.
pub fn resolve(world: &World, id: u64) -> Option<Entity> {
    Entity::from_bits(id).filter(|entity| world.contains(*entity))
}
