use serde::{Deserialize, Serialize};

use crate::game::gate::Rejection;
use crate::game::types::Ticks;

/// Player-facing text for rejected activations.
///
/// Placeholders: `{time}` remaining cooldown in seconds, `{max}` the
/// configured range, `{distance}` the measured range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    pub prefix: String,
    pub no_permission: String,
    pub cooldown: String,
    pub too_far: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            prefix: "[AeroHook] ".into(),
            no_permission: "You don't have permission to use the grappling hook.".into(),
            cooldown: "Grappling hook is on cooldown for {time}s.".into(),
            too_far: "Too far away! Maximum distance is {max} blocks.".into(),
        }
    }
}

impl MessageTemplates {
    pub fn render(&self, rejection: &Rejection) -> String {
        let body = match rejection {
            Rejection::NoPermission => self.no_permission.clone(),
            Rejection::OnCooldown { remaining_ticks } => self.cooldown.replace(
                "{time}",
                &format!("{:.1}", Ticks(*remaining_ticks).as_secs_f64()),
            ),
            Rejection::TooFar {
                distance,
                max_distance,
            } => self
                .too_far
                .replace("{max}", &(*max_distance as i64).to_string())
                .replace("{distance}", &format!("{distance:.1}")),
        };
        format!("{}{}", self.prefix, body)
    }
}
