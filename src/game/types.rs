use std::fmt;

use bevy::math::DVec3;
use uuid::Uuid;

/// Host tick length. Fixed, independent of server TPS.
pub const TICK_MS: u64 = 50;

/// Plain f64 triple used for positions and velocities.
pub type Vector3 = DVec3;

// ── Newtypes ────────────────────────────────────────────────────────

/// Stable player identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Wall-clock timestamp in milliseconds, supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Millis(pub u64);

impl Millis {
    /// Signed milliseconds since `earlier`; negative if the clock went backwards.
    pub fn since(self, earlier: Millis) -> i128 {
        i128::from(self.0) - i128::from(earlier.0)
    }

    pub fn plus(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

/// Duration in host ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Ticks(pub u64);

impl Ticks {
    pub fn as_millis(self) -> u64 {
        self.0.saturating_mul(TICK_MS)
    }

    /// Seconds at the nominal 20 ticks per second.
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 20.0
    }
}
