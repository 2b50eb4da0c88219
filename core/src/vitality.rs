use serde::{Deserialize, Serialize};

/// Lowest value a health pool can reach.
pub const MIN_HEALTH: u32 = 0;

const DANGER_RATIO: f64 = 0.35;
const WOUNDED_RATIO: f64 = 0.65;

/// Qualitative health classification used to colour the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthTier {
    /// At least 65% of the maximum remains.
    Healthy,
    /// Between 35% and 65% of the maximum remains.
    Wounded,
    /// Less than 35% of the maximum remains.
    Danger,
}

impl HealthTier {
    fn from_ratio(current: u32, max: u32) -> Self {
        if max == 0 {
            return Self::Danger;
        }

        let ratio = f64::from(current) / f64::from(max);
        if ratio < DANGER_RATIO {
            Self::Danger
        } else if ratio < WOUNDED_RATIO {
            Self::Wounded
        } else {
            Self::Healthy
        }
    }
}

/// Saturating health pool that only ever decreases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitality {
    max: u32,
    current: u32,
    tier: HealthTier,
}

impl Vitality {
    /// Creates a full health pool with the provided maximum.
    #[must_use]
    pub fn new(max: u32) -> Self {
        Self {
            max,
            current: max,
            tier: HealthTier::from_ratio(max, max),
        }
    }

    /// Deducts `amount`, saturating at [`MIN_HEALTH`], and refreshes the tier.
    pub fn apply_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount).max(MIN_HEALTH);
        self.tier = HealthTier::from_ratio(self.current, self.max);
    }

    /// Remaining health.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Health the pool started with.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Floor the pool saturates at.
    #[must_use]
    pub const fn min(&self) -> u32 {
        MIN_HEALTH
    }

    /// Tier derived from the most recent damage application.
    #[must_use]
    pub const fn tier(&self) -> HealthTier {
        self.tier
    }

    /// Remaining health as a truncated integer percentage of the maximum.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.max == 0 {
            return 0;
        }
        let percent = u64::from(self.current) * 100 / u64::from(self.max);
        u32::try_from(percent).unwrap_or(100)
    }

    /// Reports whether the pool has reached the minimum.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.current <= MIN_HEALTH
    }
}
