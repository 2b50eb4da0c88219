//! Tunable arena parameters, loadable from TOML.

use serde::{Deserialize, Serialize};
use shadow_dimension_core::{HostileKind, SpriteSize};
use thiserror::Error;

/// Complete set of tunables consumed when building an arena.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Collision extents of every sprite.
    pub sprites: SpriteTable,
    /// Coordinate the player must reach in a level without a boss.
    pub goal: GoalConfig,
    /// Aggro radii of every hostile kind.
    pub detect_radius: DetectRadii,
}

impl ArenaConfig {
    /// Rejects sprite sizes and detect radii that would make the simulation
    /// degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, size) in self.sprites.entries() {
            if !(size.width() > 0.0 && size.height() > 0.0) {
                return Err(ConfigError::InvalidSprite {
                    sprite: name,
                    width: size.width(),
                    height: size.height(),
                });
            }
        }

        if self.sprites.player_attack.width() < self.sprites.player.width() {
            return Err(ConfigError::NarrowAttack {
                attack: self.sprites.player_attack.width(),
                idle: self.sprites.player.width(),
            });
        }

        for kind in [HostileKind::Demon, HostileKind::Navec] {
            let radius = self.detect_radius.for_kind(kind);
            if !(radius.is_finite() && radius > 0.0) {
                return Err(ConfigError::InvalidDetectRadius { kind, radius });
            }
        }

        Ok(())
    }
}

/// Collision extents of every sprite the arena places.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteTable {
    /// Player at rest.
    pub player: SpriteSize,
    /// Player while attacking; wider than the resting sprite.
    pub player_attack: SpriteSize,
    /// Demon hostile.
    pub demon: SpriteSize,
    /// Navec boss.
    pub navec: SpriteSize,
    /// Fire produced by a demon.
    pub demon_fire: SpriteSize,
    /// Fire produced by Navec.
    pub navec_fire: SpriteSize,
    /// Wall obstacle.
    pub wall: SpriteSize,
    /// Tree obstacle.
    pub tree: SpriteSize,
    /// Sinkhole trap.
    pub sinkhole: SpriteSize,
}

impl Default for SpriteTable {
    fn default() -> Self {
        Self {
            player: SpriteSize::new(60.0, 66.0),
            player_attack: SpriteSize::new(84.0, 66.0),
            demon: SpriteSize::new(60.0, 60.0),
            navec: SpriteSize::new(110.0, 120.0),
            demon_fire: SpriteSize::new(40.0, 40.0),
            navec_fire: SpriteSize::new(60.0, 60.0),
            wall: SpriteSize::new(50.0, 50.0),
            tree: SpriteSize::new(50.0, 50.0),
            sinkhole: SpriteSize::new(50.0, 50.0),
        }
    }
}

impl SpriteTable {
    /// Body size of a hostile kind.
    #[must_use]
    pub fn hostile(&self, kind: HostileKind) -> SpriteSize {
        match kind {
            HostileKind::Demon => self.demon,
            HostileKind::Navec => self.navec,
        }
    }

    /// Fire size of a hostile kind.
    #[must_use]
    pub fn fire(&self, kind: HostileKind) -> SpriteSize {
        match kind {
            HostileKind::Demon => self.demon_fire,
            HostileKind::Navec => self.navec_fire,
        }
    }

    fn entries(&self) -> [(&'static str, SpriteSize); 9] {
        [
            ("player", self.player),
            ("player_attack", self.player_attack),
            ("demon", self.demon),
            ("navec", self.navec),
            ("demon_fire", self.demon_fire),
            ("navec_fire", self.navec_fire),
            ("wall", self.wall),
            ("tree", self.tree),
            ("sinkhole", self.sinkhole),
        ]
    }
}

/// Coordinate the player's anchor must reach or pass to clear a boss-less level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    /// Minimum anchor `x`.
    pub x: f64,
    /// Minimum anchor `y`.
    pub y: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self { x: 950.0, y: 670.0 }
    }
}

/// Distance at which each hostile kind notices the player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectRadii {
    /// Demon aggro radius.
    pub demon: f64,
    /// Navec aggro radius.
    pub navec: f64,
}

impl Default for DetectRadii {
    fn default() -> Self {
        Self {
            demon: 150.0,
            navec: 200.0,
        }
    }
}

impl DetectRadii {
    /// Radius configured for `kind`.
    #[must_use]
    pub fn for_kind(&self, kind: HostileKind) -> f64 {
        match kind {
            HostileKind::Demon => self.demon,
            HostileKind::Navec => self.navec,
        }
    }
}

/// Reasons an [`ArenaConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A sprite has a non-positive extent.
    #[error("sprite `{sprite}` must have positive extents, found {width}x{height}")]
    InvalidSprite {
        /// Name of the offending sprite entry.
        sprite: &'static str,
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },
    /// The attack sprite is narrower than the resting player sprite.
    #[error("player attack width {attack} is narrower than the idle width {idle}")]
    NarrowAttack {
        /// Configured attack width.
        attack: f64,
        /// Configured resting width.
        idle: f64,
    },
    /// A detect radius is zero, negative, or not finite.
    #[error("detect radius for {kind:?} must be positive, found {radius}")]
    InvalidDetectRadius {
        /// Hostile kind with the offending radius.
        kind: HostileKind,
        /// Configured radius.
        radius: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ArenaConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config: ArenaConfig = toml::from_str(
            r#"
            [goal]
            x = 400.0

            [sprites.demon]
            width = 32.0
            height = 48.0
            "#,
        )
        .expect("config parses");

        assert_eq!(config.goal.x, 400.0);
        assert_eq!(config.goal.y, GoalConfig::default().y);
        assert_eq!(config.sprites.demon, SpriteSize::new(32.0, 48.0));
        assert_eq!(config.sprites.navec, SpriteTable::default().navec);
        assert_eq!(config.detect_radius, DetectRadii::default());
    }

    #[test]
    fn non_positive_detect_radius_is_rejected() {
        let mut config = ArenaConfig::default();
        config.detect_radius.navec = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDetectRadius {
                kind: HostileKind::Navec,
                radius: 0.0,
            })
        );
    }

    #[test]
    fn degenerate_sprite_is_rejected() {
        let mut config = ArenaConfig::default();
        config.sprites.wall = SpriteSize::new(50.0, -1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSprite { sprite: "wall", .. })
        ));
    }
}
