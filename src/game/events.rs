use bevy::prelude::*;

use super::gate::{ActivationOutcome, HookState};
use super::types::{Millis, Vector3};

/// Hook state change delivered by the host.
#[derive(Message, Debug, Clone)]
pub struct HookMessage {
    pub player: Entity,
    pub state: HookState,
    pub hook_pos: Vector3,
    pub at: Millis,
}

/// Gate decision for one hook message. Hosts read `cancel_default` to
/// suppress vanilla fishing.
#[derive(Message, Debug, Clone)]
pub struct HookResolved {
    pub player: Entity,
    pub outcome: ActivationOutcome,
    pub cancel_default: bool,
}

/// Text to show the player.
#[derive(Message, Debug, Clone)]
pub struct GrappleFeedback {
    pub player: Entity,
    pub text: String,
}

/// Re-read the configuration file and swap it in.
#[derive(Message, Debug, Clone, Default)]
pub struct ReloadGrappleConfig;
