use std::path::PathBuf;

use bevy::prelude::*;

use crate::config::grapple::{GrappleConfig, GrappleConfigSource, SharedConfig};
use crate::game::{
    components::*,
    cooldown::CooldownTracker,
    events::{GrappleFeedback, HookMessage, HookResolved, ReloadGrappleConfig},
    gate::{ActivationOutcome, GrappleActivationGate, HookEvent},
};

// ── SystemSets (strict Update ordering) ─────────────────────────────

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GrappleSet {
    ConfigSet,
    EvaluateSet,
    FeedbackSet,
}

/// Wires the grapple core into an app: hook messages in, velocity writes
/// and feedback out.
#[derive(Default)]
pub struct GrapplePlugin {
    /// Overrides the default data-dir location of grapple.ron.
    pub config_path: Option<PathBuf>,
}

impl GrapplePlugin {
    pub fn with_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }
}

impl Plugin for GrapplePlugin {
    fn build(&self, app: &mut App) {
        let source = self
            .config_path
            .clone()
            .map(GrappleConfigSource)
            .unwrap_or_default();
        let config = GrappleConfig::load_or_default(&source.0);

        app.add_message::<HookMessage>();
        app.add_message::<HookResolved>();
        app.add_message::<GrappleFeedback>();
        app.add_message::<ReloadGrappleConfig>();

        app.insert_resource(SharedConfig::new(config));
        app.insert_resource(source);
        app.init_resource::<CooldownTracker>();
        // A gate inserted before the plugin (custom identity) is kept.
        app.init_resource::<GrappleActivationGate>();

        app.configure_sets(
            Update,
            (
                GrappleSet::ConfigSet,
                GrappleSet::EvaluateSet,
                GrappleSet::FeedbackSet,
            )
                .chain(),
        );

        app.add_systems(Update, handle_reload.in_set(GrappleSet::ConfigSet));
        app.add_systems(Update, evaluate_hooks.in_set(GrappleSet::EvaluateSet));
        app.add_systems(Update, send_feedback.in_set(GrappleSet::FeedbackSet));
        app.add_systems(Last, reset_on_exit);

        info!("AeroHook grapple plugin enabled");
    }
}

/// ConfigSet: swap in a freshly loaded snapshot.
pub fn handle_reload(
    mut reloads: MessageReader<ReloadGrappleConfig>,
    source: Res<GrappleConfigSource>,
    config: Res<SharedConfig>,
) {
    if reloads.read().count() == 0 {
        return;
    }
    config.replace(GrappleConfig::load_or_default(&source.0));
    info!("Grapple configuration reloaded");
}

/// EvaluateSet: run each hook message through the gate and apply the pull.
pub fn evaluate_hooks(
    config: Res<SharedConfig>,
    cooldowns: Res<CooldownTracker>,
    gate: Res<GrappleActivationGate>,
    mut hooks: MessageReader<HookMessage>,
    mut players: Query<(
        &GrappleUser,
        &Position,
        &mut Velocity,
        &MainHand,
        Option<&Permissions>,
    )>,
    mut resolved: MessageWriter<HookResolved>,
) {
    let cfg = config.snapshot();
    for hook in hooks.read() {
        let Ok((user, pos, mut vel, hand, perms)) = players.get_mut(hook.player) else {
            warn!("Hook message for {:?} without grapple user components", hook.player);
            continue;
        };

        let event = HookEvent {
            player: user.id,
            held_item: hand.0.clone(),
            permission_granted: perms.is_some_and(|p| p.has(USE_PERMISSION)),
            hook_state: hook.state,
            hook_pos: hook.hook_pos,
            player_pos: pos.0,
            current_velocity: vel.0,
            now: hook.at,
        };

        let outcome = gate.evaluate(&event, &cfg, &cooldowns);
        if let ActivationOutcome::Approved(activation) = &outcome {
            vel.0 = activation.velocity;
        }

        resolved.write(HookResolved {
            player: hook.player,
            outcome,
            cancel_default: outcome.cancels_default(),
        });
    }
}

/// FeedbackSet: turn rejections into player-facing text.
pub fn send_feedback(
    config: Res<SharedConfig>,
    mut resolved: MessageReader<HookResolved>,
    mut feedback: MessageWriter<GrappleFeedback>,
) {
    let cfg = config.snapshot();
    for r in resolved.read() {
        if let Some(rejection) = r.outcome.rejection() {
            feedback.write(GrappleFeedback {
                player: r.player,
                text: cfg.messages.render(rejection),
            });
        }
    }
}

/// Drop every cooldown record when the app shuts down.
pub fn reset_on_exit(mut exits: MessageReader<AppExit>, cooldowns: Res<CooldownTracker>) {
    if exits.read().count() == 0 {
        return;
    }
    cooldowns.reset();
    info!("AeroHook grapple plugin disabled");
}
