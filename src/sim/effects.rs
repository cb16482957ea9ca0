//! Timed player effects
//!
//! Each effect is an optional absolute expiry timestamp on the player. The
//! sweep runs exactly once per tick, before collision resolution, so whether
//! an effect still protects on its final tick is decided by a strict
//! `expiry <= now` comparison and nothing else.

use crate::consts::*;

/// Expiring player boosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    RapidFire,
    Shield,
    DoubleShot,
    Invincible,
}

/// Per-effect expiry timestamps. `None` means inactive.
#[derive(Debug, Clone, Default)]
pub struct ActiveEffects {
    rapid_until_ms: Option<u64>,
    shield_until_ms: Option<u64>,
    double_until_ms: Option<u64>,
    invincible_until_ms: Option<u64>,
}

impl ActiveEffects {
    /// Activate or refresh an effect: expiry becomes `now + duration`.
    pub fn activate(&mut self, kind: EffectKind, now_ms: u64, duration_ms: u64) {
        let until = Some(now_ms + duration_ms);
        match kind {
            EffectKind::RapidFire => self.rapid_until_ms = until,
            EffectKind::Shield => self.shield_until_ms = until,
            EffectKind::DoubleShot => self.double_until_ms = until,
            EffectKind::Invincible => self.invincible_until_ms = until,
        }
    }

    /// Expire everything whose time has passed. Strict boundary: an effect
    /// with `expiry == now` is gone on this sweep.
    pub fn sweep(&mut self, now_ms: u64) {
        for slot in [
            &mut self.rapid_until_ms,
            &mut self.shield_until_ms,
            &mut self.double_until_ms,
            &mut self.invincible_until_ms,
        ] {
            if slot.is_some_and(|until| until <= now_ms) {
                *slot = None;
            }
        }
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.until(kind).is_some()
    }

    /// Remaining duration in ms, zero when inactive
    pub fn remaining_ms(&self, kind: EffectKind, now_ms: u64) -> u64 {
        self.until(kind)
            .map_or(0, |until| until.saturating_sub(now_ms))
    }

    /// Current shot cooldown: rapid-fire shortens the baseline
    pub fn fire_cooldown_ms(&self) -> u64 {
        if self.rapid_until_ms.is_some() {
            RAPID_FIRE_COOLDOWN_MS
        } else {
            FIRE_COOLDOWN_MS
        }
    }

    /// Shield or invincibility: enemy fire is ignored entirely
    pub fn collision_immune(&self) -> bool {
        self.shield_until_ms.is_some() || self.invincible_until_ms.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn until(&self, kind: EffectKind) -> Option<u64> {
        match kind {
            EffectKind::RapidFire => self.rapid_until_ms,
            EffectKind::Shield => self.shield_until_ms,
            EffectKind::DoubleShot => self.double_until_ms,
            EffectKind::Invincible => self.invincible_until_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_and_refresh() {
        let mut fx = ActiveEffects::default();
        fx.activate(EffectKind::Shield, 1_000, SHIELD_DURATION_MS);
        assert!(fx.is_active(EffectKind::Shield));
        assert_eq!(fx.remaining_ms(EffectKind::Shield, 1_000), 6_000);

        // Re-activation refreshes, never stacks
        fx.activate(EffectKind::Shield, 4_000, SHIELD_DURATION_MS);
        assert_eq!(fx.remaining_ms(EffectKind::Shield, 4_000), 6_000);
    }

    #[test]
    fn test_strict_expiry_boundary() {
        let mut fx = ActiveEffects::default();
        fx.activate(EffectKind::RapidFire, 0, RAPID_FIRE_DURATION_MS);
        assert_eq!(fx.fire_cooldown_ms(), RAPID_FIRE_COOLDOWN_MS);

        // One ms before expiry: still active
        fx.sweep(RAPID_FIRE_DURATION_MS - 1);
        assert!(fx.is_active(EffectKind::RapidFire));

        // Exactly at expiry: gone, cooldown restored to baseline
        fx.sweep(RAPID_FIRE_DURATION_MS);
        assert!(!fx.is_active(EffectKind::RapidFire));
        assert_eq!(fx.fire_cooldown_ms(), FIRE_COOLDOWN_MS);
    }

    #[test]
    fn test_immunity_sources() {
        let mut fx = ActiveEffects::default();
        assert!(!fx.collision_immune());

        fx.activate(EffectKind::Invincible, 0, INVINCIBILITY_DURATION_MS);
        assert!(fx.collision_immune());

        fx.sweep(INVINCIBILITY_DURATION_MS);
        assert!(!fx.collision_immune());

        fx.activate(EffectKind::Shield, 0, SHIELD_DURATION_MS);
        assert!(fx.collision_immune());
    }

    #[test]
    fn test_sweep_only_clears_expired() {
        let mut fx = ActiveEffects::default();
        fx.activate(EffectKind::RapidFire, 0, 1_000);
        fx.activate(EffectKind::DoubleShot, 0, 5_000);

        fx.sweep(1_000);
        assert!(!fx.is_active(EffectKind::RapidFire));
        assert!(fx.is_active(EffectKind::DoubleShot));
    }
}
