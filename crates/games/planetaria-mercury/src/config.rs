//! Single source of truth for Mercury level constants, loadable from TOML.

use serde::{Deserialize, Serialize};

/// World width in pixels. Must be a multiple of the tile size.
pub const WORLD_WIDTH: f32 = 2048.0;
/// World height in pixels. Must be a multiple of the tile size.
pub const WORLD_HEIGHT: f32 = 2048.0;
/// Pixels per terrain grid cell.
pub const TILE_SIZE: f32 = 32.0;
/// Minimum solid rows per terrain column.
pub const MIN_ROWS: u32 = 4;
/// Maximum extra rows on top of the minimum.
pub const MAX_EXTRA: u32 = 6;
/// Default terrain seed.
pub const TERRAIN_SEED: u32 = 42;

/// Horizontal move speed (px/s).
pub const MOVE_SPEED: f32 = 150.0;
/// Upward jump impulse magnitude (px/s).
pub const JUMP_VELOCITY: f32 = 360.0;
/// Downward gravity (px/s^2, y-down world).
pub const GRAVITY: f32 = 800.0;
/// Time held in the jump-launch pose before the impulse applies.
pub const LAUNCH_DELAY: f32 = 0.1;
/// Time held in the landing pose before returning to idle/walking.
pub const LANDING_DELAY: f32 = 0.15;

/// Camera follow smoothing.
pub const CAMERA_LERP: f32 = 0.09;
/// Camera dead-zone, both axes (px).
pub const CAMERA_DEADZONE: f32 = 4.0;

/// Mis-tiled or degenerate world dimensions; rejected at level load.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidTileSize(f32),
    InvalidExtent {
        axis: &'static str,
        extent: f32,
    },
    NotTileAligned {
        axis: &'static str,
        extent: f32,
        tile_size: f32,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTileSize(size) => write!(f, "tile size must be positive, got {size}"),
            Self::InvalidExtent { axis, extent } => {
                write!(f, "world {axis} must be positive, got {extent}")
            },
            Self::NotTileAligned {
                axis,
                extent,
                tile_size,
            } => write!(
                f,
                "world {axis} ({extent}) is not a multiple of tile size ({tile_size})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// World bounds and terrain-generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    pub tile_size: f32,
    pub min_rows: u32,
    pub max_extra: u32,
    pub seed: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            tile_size: TILE_SIZE,
            min_rows: MIN_ROWS,
            max_extra: MAX_EXTRA,
            seed: TERRAIN_SEED,
        }
    }
}

impl WorldConfig {
    /// Fail fast on dimensions that would mis-tile the terrain grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size <= 0.0 {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if self.width <= 0.0 {
            return Err(ConfigError::InvalidExtent {
                axis: "width",
                extent: self.width,
            });
        }
        if self.height <= 0.0 {
            return Err(ConfigError::InvalidExtent {
                axis: "height",
                extent: self.height,
            });
        }
        if self.width % self.tile_size != 0.0 {
            return Err(ConfigError::NotTileAligned {
                axis: "width",
                extent: self.width,
                tile_size: self.tile_size,
            });
        }
        if self.height % self.tile_size != 0.0 {
            return Err(ConfigError::NotTileAligned {
                axis: "height",
                extent: self.height,
                tile_size: self.tile_size,
            });
        }
        Ok(())
    }

    /// Number of terrain columns.
    pub fn cols(&self) -> usize {
        (self.width / self.tile_size) as usize
    }
}

/// Which movement states are wired into the player controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementProfile {
    /// Full six-state platformer machine under gravity.
    Platformer,
    /// Four-direction top-down movement, idle/walking only, no gravity.
    TopDown,
}

/// Player movement, hitbox, and spritesheet frame parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub profile: MovementProfile,
    pub speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub launch_delay: f32,
    pub landing_delay: f32,
    pub frame_width: f32,
    pub frame_height: f32,
    pub hitbox_width: f32,
    pub hitbox_height: f32,
    pub idle_frame: u32,
    pub walk_frame_start: u32,
    pub walk_frame_end: u32,
    pub walk_frame_rate: f32,
    pub launch_frame: u32,
    pub rise_frame: u32,
    pub fall_frame: u32,
    pub land_frame: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            profile: MovementProfile::Platformer,
            speed: MOVE_SPEED,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            launch_delay: LAUNCH_DELAY,
            landing_delay: LANDING_DELAY,
            frame_width: 32.0,
            frame_height: 52.0,
            hitbox_width: 32.0,
            hitbox_height: 32.0,
            idle_frame: 0,
            walk_frame_start: 0,
            walk_frame_end: 7,
            walk_frame_rate: 10.0,
            launch_frame: 8,
            rise_frame: 9,
            fall_frame: 10,
            land_frame: 11,
        }
    }
}

/// Camera follow parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub lerp: f32,
    pub deadzone_x: f32,
    pub deadzone_y: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lerp: CAMERA_LERP,
            deadzone_x: CAMERA_DEADZONE,
            deadzone_y: CAMERA_DEADZONE,
        }
    }
}

/// Top-level Mercury level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MercuryConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
}

impl MercuryConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is
    /// missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("PLANETARIA_CONFIG")
            .unwrap_or_else(|_| "config/mercury.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<MercuryConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    MercuryConfig::default()
                },
            },
            Err(_) => MercuryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(WorldConfig::default().validate(), Ok(()));
        assert_eq!(WorldConfig::default().cols(), 64);
    }

    #[test]
    fn misaligned_width_rejected() {
        let world = WorldConfig {
            width: 2000.0, // 2000 / 32 = 62.5
            ..WorldConfig::default()
        };
        assert!(matches!(
            world.validate(),
            Err(ConfigError::NotTileAligned { axis: "width", .. })
        ));
    }

    #[test]
    fn misaligned_height_rejected() {
        let world = WorldConfig {
            height: 1000.0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            world.validate(),
            Err(ConfigError::NotTileAligned { axis: "height", .. })
        ));
    }

    #[test]
    fn zero_or_negative_extent_rejected() {
        // 0.0 % 32.0 == 0.0, so a degenerate world would slip past the
        // alignment check alone.
        let world = WorldConfig {
            width: 0.0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            world.validate(),
            Err(ConfigError::InvalidExtent { axis: "width", .. })
        ));

        let world = WorldConfig {
            height: -64.0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            world.validate(),
            Err(ConfigError::InvalidExtent { axis: "height", .. })
        ));
    }

    #[test]
    fn zero_tile_size_rejected() {
        let world = WorldConfig {
            tile_size: 0.0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            world.validate(),
            Err(ConfigError::InvalidTileSize(_))
        ));
    }

    #[test]
    fn toml_roundtrip_preserves_config() {
        let cfg = MercuryConfig::default();
        let text = toml::to_string(&cfg).unwrap();
        let back: MercuryConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: MercuryConfig = toml::from_str(
            r#"
            [world]
            seed = 7

            [player]
            profile = "top_down"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.world.seed, 7);
        assert_eq!(cfg.world.tile_size, TILE_SIZE);
        assert_eq!(cfg.player.profile, MovementProfile::TopDown);
        assert_eq!(cfg.player.speed, MOVE_SPEED);
    }
}
