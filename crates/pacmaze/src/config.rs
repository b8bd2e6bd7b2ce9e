//! Game configuration
//!
//! Everything tunable lives in one [`GameConfig`] document. Every section and
//! field is optional in the file; missing values take the built-in defaults.

use std::path::{Path, PathBuf};

use maze_engine::config::Config;
use maze_engine::foundation::math::Vec3;
use maze_engine::input::ScriptedInput;
use maze_engine::render::SphereParams;
use maze_engine::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::layout::LevelLayout;

/// Name of the shipped configuration file
pub const CONFIG_FILE: &str = "pacmaze.toml";

/// Avatar geometry and animation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Body sphere radius
    pub radius: f32,
    /// Latitude bands of the body and eye spheres
    pub latitude_bands: u32,
    /// Longitude bands of the body and eye spheres
    pub longitude_bands: u32,
    /// Forward distance per unblocked tick
    pub move_step: f32,
    /// Height change per airborne tick
    pub jump_step: f32,
    /// Apex height of a jump
    pub jump_ceiling: f32,
    /// Mouth opening change per tick
    pub mouth_step: f32,
    /// Widest mouth opening
    pub mouth_max: f32,
    /// Eye size relative to the body's unit sphere
    pub eye_ratio: f32,
    /// Eye socket offsets in eye units
    pub eye_sockets: [[f32; 3]; 2],
    /// Socket shift per opening tick, in eye units
    pub eye_nudge: [f32; 3],
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            radius: 0.85,
            latitude_bands: 35,
            longitude_bands: 35,
            move_step: 0.1,
            jump_step: 0.1,
            jump_ceiling: 2.0,
            mouth_step: 0.02,
            mouth_max: 0.3,
            eye_ratio: 0.2,
            eye_sockets: [[-1.5, 2.5, 3.3], [1.5, 2.5, 3.3]],
            eye_nudge: [0.0, 0.1, -0.08],
        }
    }
}

impl AvatarConfig {
    /// Eye nudge as a vector
    pub fn eye_nudge(&self) -> Vec3 {
        Vec3::from(self.eye_nudge)
    }

    /// Check ranges the avatar relies on
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("radius", self.radius),
            ("move_step", self.move_step),
            ("jump_step", self.jump_step),
            ("jump_ceiling", self.jump_ceiling),
            ("mouth_step", self.mouth_step),
            ("mouth_max", self.mouth_max),
            ("eye_ratio", self.eye_ratio),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidSetting(format!("avatar.{name} must be positive, got {value}")));
            }
        }

        let bands = 1..=SphereParams::MAX_BANDS;
        if !(bands.contains(&self.latitude_bands) && bands.contains(&self.longitude_bands)) {
            return Err(GameError::InvalidSetting(format!(
                "avatar sphere needs between 1 and {} bands each way, got {}x{}",
                SphereParams::MAX_BANDS,
                self.latitude_bands,
                self.longitude_bands
            )));
        }

        let offsets = [
            ("eye_sockets[0]", self.eye_sockets[0]),
            ("eye_sockets[1]", self.eye_sockets[1]),
            ("eye_nudge", self.eye_nudge),
        ];
        for (name, offset) in offsets {
            if !offset.iter().all(|c| c.is_finite()) {
                return Err(GameError::InvalidSetting(format!(
                    "avatar.{name} must be finite, got {offset:?}"
                )));
            }
        }
        if self.mouth_max >= 0.6 {
            return Err(GameError::InvalidSetting(format!(
                "avatar.mouth_max must stay below 0.6, got {}",
                self.mouth_max
            )));
        }
        if self.mouth_step > self.mouth_max {
            return Err(GameError::InvalidSetting(
                "avatar.mouth_step must not exceed avatar.mouth_max".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Main loop settings
    pub engine: EngineConfig,
    /// Avatar constants
    pub avatar: AvatarConfig,
    /// Level description
    pub layout: LevelLayout,
    /// Scripted key presses for headless runs
    pub input: ScriptedInput,
}

impl Config for GameConfig {}

impl GameConfig {
    /// Load the configuration from `path`, or use the defaults when there is
    /// no file, then validate it
    pub fn load(path: Option<&Path>) -> Result<Self, GameError> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), GameError> {
        self.avatar.validate()?;
        self.layout.validate()?;
        Ok(())
    }
}

/// Path to load: the explicit one if given, otherwise the first file found
pub fn locate(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(find_config_file)
}

/// Candidate config locations, in probe order
fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = vec![
        PathBuf::from("config").join(CONFIG_FILE),
        PathBuf::from("crates/pacmaze/config").join(CONFIG_FILE),
        PathBuf::from("../config").join(CONFIG_FILE),
    ];

    let mut manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest.push("config");
    manifest.push(CONFIG_FILE);
    candidates.push(manifest);

    candidates
}

/// First existing config file, working directory first
pub fn find_config_file() -> Option<PathBuf> {
    candidate_paths().into_iter().find(|path| {
        log::debug!("Probing {}", path.display());
        path.is_file()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_engine::input::KeyCode;

    fn shipped_config_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config").join(CONFIG_FILE)
    }

    #[test]
    fn test_shipped_config_parses() {
        let config = GameConfig::load(Some(shipped_config_path().as_path())).unwrap();

        assert_eq!(config.avatar, AvatarConfig::default());
        assert_eq!(config.layout, LevelLayout::labyrinth());
        assert_eq!(config.engine.log_level, "info");
        assert_eq!(config.input.events[0].key, KeyCode::ArrowLeft);
        assert_eq!(config.engine.max_frames, Some(600));
    }

    #[test]
    fn test_locate() {
        assert!(find_config_file().is_some());

        let explicit = PathBuf::from("elsewhere.ron");
        assert_eq!(locate(Some(explicit.clone())), Some(explicit));
    }

    #[test]
    fn test_no_file_means_defaults() {
        assert_eq!(GameConfig::load(None).unwrap(), GameConfig::default());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GameConfig = maze_engine::config::ConfigFormat::Toml
            .parse(
                r#"
                [engine]
                max_frames = 120

                [avatar]
                move_step = 0.25
                "#,
            )
            .unwrap();

        assert_eq!(config.engine.max_frames, Some(120));
        assert!((config.avatar.move_step - 0.25).abs() < f32::EPSILON);
        assert_eq!(config.avatar.latitude_bands, 35);
        assert_eq!(config.layout.walls.len(), 20);
        assert!(config.input.is_empty());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = GameConfig::load(Some(Path::new("definitely/not/here.toml")));
        assert!(matches!(result, Err(GameError::Config(_))));
    }

    #[test]
    fn test_avatar_validation() {
        assert!(AvatarConfig::default().validate().is_ok());

        let broken = AvatarConfig {
            jump_step: 0.0,
            ..AvatarConfig::default()
        };
        assert!(matches!(broken.validate(), Err(GameError::InvalidSetting(msg)) if msg.contains("jump_step")));

        let wide_mouth = AvatarConfig {
            mouth_max: 0.7,
            ..AvatarConfig::default()
        };
        assert!(wide_mouth.validate().is_err());

        let no_bands = AvatarConfig {
            longitude_bands: 0,
            ..AvatarConfig::default()
        };
        assert!(no_bands.validate().is_err());
    }

    #[test]
    fn test_avatar_rejects_sphere_too_fine_for_u32_indices() {
        let at_limit = AvatarConfig {
            latitude_bands: SphereParams::MAX_BANDS,
            ..AvatarConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let huge = AvatarConfig {
            longitude_bands: 65_536,
            ..AvatarConfig::default()
        };
        assert!(matches!(huge.validate(), Err(GameError::InvalidSetting(msg)) if msg.contains("bands")));
    }

    #[test]
    fn test_avatar_rejects_non_finite_eye_offsets() {
        let bad_socket = AvatarConfig {
            eye_sockets: [[-1.5, 2.5, 3.3], [f32::NAN, 2.5, 3.3]],
            ..AvatarConfig::default()
        };
        assert!(matches!(bad_socket.validate(), Err(GameError::InvalidSetting(msg)) if msg.contains("eye_sockets[1]")));

        let bad_nudge = AvatarConfig {
            eye_nudge: [0.0, f32::INFINITY, -0.08],
            ..AvatarConfig::default()
        };
        assert!(matches!(bad_nudge.validate(), Err(GameError::InvalidSetting(msg)) if msg.contains("eye_nudge")));
    }

    #[test]
    fn test_oversized_pickup_grid_is_rejected_on_load() {
        let mut config = GameConfig::default();
        config.layout.pickups.half_extent = i32::MAX;
        assert!(matches!(config.validate(), Err(GameError::Layout(_))));
    }
}
