use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_PATH: &str = "resources/config.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Fixed seed for the simulation random source. Drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Extra log directives applied on top of the global `warn` level, e.g. `footplate=debug`.
    pub log_filter: String,
    pub pacing: Pacing,
    pub boiler: BoilerConfig,
    pub train: TrainConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            log_filter: "footplate=warn".into(),
            pacing: Pacing::default(),
            boiler: BoilerConfig::default(),
            train: TrainConfig::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Pacing {
    /// Length of one beat of the intro narration.
    pub intro_beat_ms: u64,
    pub turn_pause_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            intro_beat_ms: 1000,
            turn_pause_ms: 1000,
        }
    }
}

impl Pacing {
    pub fn intro_pause(&self, beats: u64) -> Duration {
        Duration::from_millis(self.intro_beat_ms * beats)
    }

    pub fn turn_pause(&self) -> Duration {
        Duration::from_millis(self.turn_pause_ms)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BoilerConfig {
    pub water_capacity: u32,
    pub initial_water: u32,
    pub tender_coal: u32,
    pub tender_water: u32,
    /// psi
    pub max_pressure: u32,
    pub shovel_amount: u32,
    pub water_amount: u32,
    pub burn_rate: u32,
    pub pressure_gain: u32,
    pub pressure_loss: u32,
    pub steam_water_use: u32,
}

impl Default for BoilerConfig {
    fn default() -> Self {
        BoilerConfig {
            water_capacity: 100,
            initial_water: 100,
            tender_coal: 500,
            tender_water: 500,
            max_pressure: 250,
            shovel_amount: 5,
            water_amount: 5,
            burn_rate: 1,
            pressure_gain: 5,
            pressure_loss: 1,
            steam_water_use: 1,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TrainConfig {
    /// Pressure must be strictly above this to open the throttle.
    pub throttle_min_pressure: u32,
    pub throttle_boost_kmh: u32,
    pub throttle_steam_cost: u32,
    pub brake_step_kmh: u32,
    pub powered_acceleration_kmh: u32,
    pub coasting_decay_kmh: u32,
    /// Probability per turn that a moving train enters a section with a different limit.
    pub speed_limit_change_chance: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            throttle_min_pressure: 50,
            throttle_boost_kmh: 10,
            throttle_steam_cost: 10,
            brake_step_kmh: 10,
            powered_acceleration_kmh: 1,
            coasting_decay_kmh: 2,
            speed_limit_change_chance: 0.1,
        }
    }
}

impl Config {
    pub fn from_toml(path: &str, contents: &str) -> Result<Config, ConfigError> {
        toml::from_str::<Config>(contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref().display().to_string();
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&path, &contents)
    }

    /// Like `load_from_file`, but a missing file yields the built-in defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        match Self::load_from_file(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => Ok(Config::default()),
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml("empty", "").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            "partial",
            r#"
            seed = 42

            [pacing]
            turn_pause_ms = 0

            [boiler]
            tender_coal = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.pacing.turn_pause_ms, 0);
        assert_eq!(config.pacing.intro_beat_ms, 1000);
        assert_eq!(config.boiler.tender_coal, 50);
        assert_eq!(config.boiler.max_pressure, 250);
        assert_eq!(config.train, TrainConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::from_toml("typo", "[boiler]\nmax_presure = 10\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_pacing_durations() {
        let pacing = Pacing {
            intro_beat_ms: 500,
            turn_pause_ms: 250,
        };
        assert_eq!(pacing.intro_pause(3), Duration::from_millis(1500));
        assert_eq!(pacing.turn_pause(), Duration::from_millis(250));
    }
}
