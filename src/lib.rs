//! Grappling hook core for block-game servers: item identity, activation
//! gating, per-player cooldowns and the blended pull velocity, plus a Bevy
//! plugin that wires them into an ECS host.

pub mod config;
pub mod game;
pub mod plugins;

pub use config::grapple::{GrappleConfig, ItemConfig, PhysicsConfig, SharedConfig};
pub use game::cooldown::{CooldownError, CooldownTracker};
pub use game::gate::{
    Activation, ActivationOutcome, GrappleActivationGate, HookEvent, HookState, Rejection,
};
pub use game::item::{DisplayNameIdentity, HookItemIdentity, ItemDescriptor, ItemMaterial};
pub use game::types::{Millis, PlayerId, TICK_MS, Vector3};
pub use game::velocity::compute_velocity;
pub use plugins::grapple_plugin::GrapplePlugin;
