use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Operator-tunable vehicle parameters.
///
/// Every field has a default so partial TOML files work; missing fields fall
/// back to the stock kart tuning.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VehicleConfig {
    /// Top speed, world units per second.
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    /// Yaw rate at full steering input, degrees per second.
    #[serde(default = "default_turn_rate")]
    pub turn_rate: f32,
    /// Speed gained per second while accelerating.
    #[serde(default = "default_acceleration")]
    pub acceleration: f32,
    /// Speed lost per second while coasting.
    #[serde(default = "default_deceleration")]
    pub deceleration: f32,
    /// Speed lost per second while braking; also the rear brake torque.
    #[serde(default = "default_brake_force")]
    pub brake_force: f32,
    /// Front wheel steering angle at full input, degrees.
    #[serde(default = "default_max_steer_angle")]
    pub max_steer_angle: f32,
    #[serde(default)]
    pub audio: AudioClips,
}

/// Clip assets bound to the three audio channels at startup.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AudioClips {
    #[serde(default = "default_engine_clip")]
    pub engine: String,
    #[serde(default = "default_braking_clip")]
    pub braking: String,
    #[serde(default = "default_idle_clip")]
    pub idle: String,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            turn_rate: default_turn_rate(),
            acceleration: default_acceleration(),
            deceleration: default_deceleration(),
            brake_force: default_brake_force(),
            max_steer_angle: default_max_steer_angle(),
            audio: AudioClips::default(),
        }
    }
}

impl Default for AudioClips {
    fn default() -> Self {
        Self {
            engine: default_engine_clip(),
            braking: default_braking_clip(),
            idle: default_idle_clip(),
        }
    }
}

fn default_max_speed() -> f32 {
    10.0
}

fn default_turn_rate() -> f32 {
    50.0
}

fn default_acceleration() -> f32 {
    5.0
}

fn default_deceleration() -> f32 {
    5.0
}

fn default_brake_force() -> f32 {
    100.0
}

fn default_max_steer_angle() -> f32 {
    30.0
}

fn default_engine_clip() -> String {
    "audio/engine_loop.ogg".to_string()
}

fn default_braking_clip() -> String {
    "audio/brake_squeal.ogg".to_string()
}

fn default_idle_clip() -> String {
    "audio/engine_idle.ogg".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("{field} must be >= 0 (got {value})")]
    NegativeField { field: &'static str, value: f32 },
}

impl VehicleConfig {
    /// Load and validate a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save this config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// All rates and limits must be non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("max_speed", self.max_speed),
            ("turn_rate", self.turn_rate),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("brake_force", self.brake_force),
            ("max_steer_angle", self.max_steer_angle),
        ];
        for (field, value) in fields {
            if value < 0.0 {
                return Err(ConfigError::NegativeField { field, value });
            }
        }
        Ok(())
    }
}
