use std::collections::HashSet;

use bevy::prelude::*;

use super::item::ItemDescriptor;
use super::types::{PlayerId, Vector3};

/// Permission node required to fire a grapple.
pub const USE_PERMISSION: &str = "grapplinghook.use";

// ── Player state mirrored from the host ─────────────────────────────

#[derive(Component, Debug, Clone, Copy)]
pub struct GrappleUser {
    pub id: PlayerId,
}

/// Feet position in world space.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Position(pub Vector3);

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Velocity(pub Vector3);

#[derive(Component, Debug, Clone, Default)]
pub struct MainHand(pub Option<ItemDescriptor>);

impl MainHand {
    pub fn holding(item: ItemDescriptor) -> Self {
        Self(Some(item))
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Permissions(pub HashSet<String>);

impl Permissions {
    pub fn with(nodes: &[&str]) -> Self {
        Self(nodes.iter().map(|n| n.to_string()).collect())
    }

    pub fn has(&self, node: &str) -> bool {
        self.0.contains(node)
    }
}
