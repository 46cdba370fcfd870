use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};
use std::sync::{Mutex, MutexGuard, PoisonError};

use bevy::prelude::*;
use thiserror::Error;

use super::types::{Millis, PlayerId, TICK_MS, Ticks};
use crate::config::grapple::PhysicsConfig;

const SHARDS: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CooldownError {
    #[error("no cooldown record for player {0}")]
    NoRecord(PlayerId),
}

/// True while `now` is still inside the window opened at `last`.
pub fn window_active(last: Millis, now: Millis, physics: &PhysicsConfig) -> bool {
    now.since(last) < i128::from(Ticks(physics.cooldown_ticks).as_millis())
}

/// Whole ticks left in the window, truncated. Zero once it has closed.
/// A clock that went backwards leaves more than the full window.
pub fn window_remaining(last: Millis, now: Millis, physics: &PhysicsConfig) -> u64 {
    let window = i128::from(Ticks(physics.cooldown_ticks).as_millis());
    let left = (window - now.since(last)).max(0) / i128::from(TICK_MS);
    u64::try_from(left).unwrap_or(u64::MAX)
}

/// Last successful activation per player.
///
/// Sharded so that operations on one player never wait on an unrelated
/// player's lock. Records are only dropped by [`CooldownTracker::reset`].
#[derive(Resource, Debug)]
pub struct CooldownTracker {
    shards: Vec<Mutex<HashMap<PlayerId, Millis>>>,
    hasher: RandomState,
}

impl Default for CooldownTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self {
            shards: (0..SHARDS).map(|_| Mutex::new(HashMap::new())).collect(),
            hasher: RandomState::new(),
        }
    }

    fn shard(&self, player: PlayerId) -> MutexGuard<'_, HashMap<PlayerId, Millis>> {
        let idx = (self.hasher.hash_one(player) as usize) % self.shards.len();
        self.shards[idx]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn last_activation(&self, player: PlayerId) -> Option<Millis> {
        self.shard(player).get(&player).copied()
    }

    pub fn is_on_cooldown(&self, player: PlayerId, now: Millis, physics: &PhysicsConfig) -> bool {
        self.last_activation(player)
            .is_some_and(|last| window_active(last, now, physics))
    }

    /// Ticks left on the player's cooldown. Only meaningful after
    /// [`is_on_cooldown`](Self::is_on_cooldown) returned true.
    pub fn remaining_ticks(
        &self,
        player: PlayerId,
        now: Millis,
        physics: &PhysicsConfig,
    ) -> Result<u64, CooldownError> {
        let last = self
            .last_activation(player)
            .ok_or(CooldownError::NoRecord(player))?;
        Ok(window_remaining(last, now, physics))
    }

    pub fn record(&self, player: PlayerId, now: Millis) {
        self.shard(player).insert(player, now);
    }

    /// Run `f` with the player's record while holding its shard lock, so a
    /// check followed by a write cannot interleave with another activation.
    pub fn with_record<R>(&self, player: PlayerId, f: impl FnOnce(&mut Option<Millis>) -> R) -> R {
        let mut shard = self.shard(player);
        let mut slot = shard.get(&player).copied();
        let out = f(&mut slot);
        match slot {
            Some(at) => {
                shard.insert(player, at);
            }
            None => {
                shard.remove(&player);
            }
        }
        out
    }

    pub fn reset(&self) {
        for shard in &self.shards {
            shard.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|s| s.lock().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics(ticks: u64) -> PhysicsConfig {
        PhysicsConfig {
            cooldown_ticks: ticks,
            ..Default::default()
        }
    }

    #[test]
    fn unknown_player_is_not_on_cooldown() {
        let tracker = CooldownTracker::new();
        assert!(!tracker.is_on_cooldown(PlayerId::random(), Millis(0), &physics(20)));
    }

    #[test]
    fn window_closes_exactly_at_threshold() {
        let tracker = CooldownTracker::new();
        let p = PlayerId::random();
        let t0 = Millis(10_000);
        tracker.record(p, t0);

        assert!(tracker.is_on_cooldown(p, t0.plus(999), &physics(20)));
        assert!(!tracker.is_on_cooldown(p, t0.plus(1_000), &physics(20)));
    }

    #[test]
    fn remaining_ticks_truncate() {
        let tracker = CooldownTracker::new();
        let p = PlayerId::random();
        let t0 = Millis(5_000);
        tracker.record(p, t0);

        assert_eq!(tracker.remaining_ticks(p, t0.plus(200), &physics(20)), Ok(16));
        assert_eq!(tracker.remaining_ticks(p, t0.plus(249), &physics(20)), Ok(15));
        assert_eq!(tracker.remaining_ticks(p, t0.plus(5_000), &physics(20)), Ok(0));
    }

    #[test]
    fn remaining_without_record_is_an_error() {
        let tracker = CooldownTracker::new();
        let p = PlayerId::random();
        assert_eq!(
            tracker.remaining_ticks(p, Millis(0), &physics(20)),
            Err(CooldownError::NoRecord(p))
        );
    }

    #[test]
    fn zero_cooldown_never_blocks() {
        let tracker = CooldownTracker::new();
        let p = PlayerId::random();
        tracker.record(p, Millis(100));
        assert!(!tracker.is_on_cooldown(p, Millis(100), &physics(0)));
    }

    #[test]
    fn backwards_clock_stays_on_cooldown() {
        let tracker = CooldownTracker::new();
        let p = PlayerId::random();
        tracker.record(p, Millis(2_000));
        assert!(tracker.is_on_cooldown(p, Millis(1_000), &physics(20)));
        // (1000 - (-1000)) / 50
        assert_eq!(tracker.remaining_ticks(p, Millis(1_000), &physics(20)), Ok(40));
    }

    #[test]
    fn record_overwrites_and_reset_clears() {
        let tracker = CooldownTracker::new();
        let a = PlayerId::random();
        let b = PlayerId::random();
        tracker.record(a, Millis(1));
        tracker.record(a, Millis(7));
        tracker.record(b, Millis(3));
        assert_eq!(tracker.last_activation(a), Some(Millis(7)));
        assert_eq!(tracker.len(), 2);

        tracker.reset();
        assert!(tracker.is_empty());
        assert_eq!(tracker.last_activation(a), None);
    }

    #[test]
    fn with_record_writes_back() {
        let tracker = CooldownTracker::new();
        let p = PlayerId::random();
        let seen = tracker.with_record(p, |slot| {
            let seen = *slot;
            *slot = Some(Millis(42));
            seen
        });
        assert_eq!(seen, None);
        assert_eq!(tracker.last_activation(p), Some(Millis(42)));
    }

    #[test]
    fn concurrent_activations_record_once() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let tracker = Arc::new(CooldownTracker::new());
        let wins = Arc::new(AtomicUsize::new(0));
        let p = PlayerId::random();
        let cfg = physics(20);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                let wins = Arc::clone(&wins);
                let cfg = cfg.clone();
                std::thread::spawn(move || {
                    tracker.with_record(p, |slot| {
                        let blocked = slot.is_some_and(|last| window_active(last, Millis(0), &cfg));
                        if !blocked {
                            *slot = Some(Millis(0));
                            wins.fetch_add(1, Ordering::SeqCst);
                        }
                    });
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(wins.load(Ordering::SeqCst), 1);
    }
}
