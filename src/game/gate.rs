use bevy::prelude::*;

use super::cooldown::{CooldownTracker, window_active, window_remaining};
use super::item::{DisplayNameIdentity, HookItemIdentity, ItemDescriptor};
use super::types::{Millis, PlayerId, Vector3};
use super::velocity::compute_velocity;
use crate::config::grapple::GrappleConfig;

/// Hook lifecycle states reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookState {
    Fishing,
    Bite,
    Lured,
    /// Hook embedded in solid terrain.
    InGround,
    FailedAttempt,
    CaughtFish,
    CaughtEntity,
    ReelIn,
}

/// Everything the gate needs to know about one hook event.
#[derive(Debug, Clone)]
pub struct HookEvent {
    pub player: PlayerId,
    pub held_item: Option<ItemDescriptor>,
    pub permission_granted: bool,
    pub hook_state: HookState,
    pub hook_pos: Vector3,
    pub player_pos: Vector3,
    pub current_velocity: Vector3,
    pub now: Millis,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    NoPermission,
    OnCooldown { remaining_ticks: u64 },
    TooFar { distance: f64, max_distance: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activation {
    pub anchor: Vector3,
    pub player_pos: Vector3,
    /// Velocity to apply to the player.
    pub velocity: Vector3,
}

/// Result of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivationOutcome {
    /// Held item is not a grapple. Host keeps its default behaviour.
    NotGrapple,
    /// Hook has not anchored yet. Nothing to decide.
    NotAnchored,
    Rejected(Rejection),
    Approved(Activation),
}

impl ActivationOutcome {
    /// Whether the host must suppress its own handling of the throw.
    pub fn cancels_default(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Approved(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

/// Ordered checks turning a hook event into at most one activation.
#[derive(Resource)]
pub struct GrappleActivationGate {
    identity: Box<dyn HookItemIdentity>,
}

impl Default for GrappleActivationGate {
    fn default() -> Self {
        Self::new(DisplayNameIdentity)
    }
}

impl GrappleActivationGate {
    pub fn new(identity: impl HookItemIdentity + 'static) -> Self {
        Self {
            identity: Box::new(identity),
        }
    }

    pub fn evaluate(
        &self,
        event: &HookEvent,
        cfg: &GrappleConfig,
        cooldowns: &CooldownTracker,
    ) -> ActivationOutcome {
        if !self.identity.is_grapple(event.held_item.as_ref(), &cfg.item) {
            return ActivationOutcome::NotGrapple;
        }

        if !event.permission_granted {
            debug!("grapple denied for {}: no permission", event.player);
            return ActivationOutcome::Rejected(Rejection::NoPermission);
        }

        if event.hook_state != HookState::InGround {
            return ActivationOutcome::NotAnchored;
        }

        let physics = &cfg.physics;
        let outcome = cooldowns.with_record(event.player, |last| {
            if let Some(last) = *last {
                if window_active(last, event.now, physics) {
                    return ActivationOutcome::Rejected(Rejection::OnCooldown {
                        remaining_ticks: window_remaining(last, event.now, physics),
                    });
                }
            }

            let distance = event.hook_pos.distance(event.player_pos);
            if distance > physics.max_distance {
                return ActivationOutcome::Rejected(Rejection::TooFar {
                    distance,
                    max_distance: physics.max_distance,
                });
            }

            let velocity = compute_velocity(
                event.player_pos,
                event.hook_pos,
                event.current_velocity,
                physics,
            );
            *last = Some(event.now);
            ActivationOutcome::Approved(Activation {
                anchor: event.hook_pos,
                player_pos: event.player_pos,
                velocity,
            })
        });

        match &outcome {
            ActivationOutcome::Approved(a) => debug!(
                "grapple approved for {}: velocity=({:.3}, {:.3}, {:.3})",
                event.player, a.velocity.x, a.velocity.y, a.velocity.z
            ),
            ActivationOutcome::Rejected(r) => {
                debug!("grapple rejected for {}: {:?}", event.player, r)
            }
            _ => {}
        }
        outcome
    }
}
