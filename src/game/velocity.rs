use super::types::Vector3;
use crate::config::grapple::PhysicsConfig;

/// Velocity toward the anchor, blended with the player's current velocity.
///
/// The order of operations is fixed: normalise, scale by pull strength,
/// scale X/Z by the horizontal multiplier, add the vertical boost, then
/// lerp from `current` by `velocity_smoothing`. Reordering changes the
/// curve the player follows. No speed clamp is applied.
///
/// When the anchor coincides with the player (or the direction is not
/// finite) the target is zero and only the decayed `current` remains.
pub fn compute_velocity(
    player_pos: Vector3,
    anchor_pos: Vector3,
    current: Vector3,
    physics: &PhysicsConfig,
) -> Vector3 {
    let direction = (anchor_pos - player_pos).normalize_or_zero();
    let target = if direction == Vector3::ZERO {
        Vector3::ZERO
    } else {
        let mut target = direction * physics.pull_strength;
        target.x *= physics.horizontal_multiplier;
        target.z *= physics.horizontal_multiplier;
        target.y += physics.vertical_boost;
        target
    };

    let s = physics.velocity_smoothing;
    current * (1.0 - s) + target * s
}
