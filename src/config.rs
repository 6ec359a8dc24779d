//! Tunable rules.  Defaults reproduce the classic game; a TOML file may
//! override any subset of fields.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    pub starting_base_health: i32,
    pub starting_gold: u32,
    /// Logical playfield size; the renderer scales it to the terminal.
    pub world_width: u32,
    pub world_height: u32,
    pub fps: u32,
    /// Gold granted each time a wave is spawned.
    pub wave_bonus: u32,
    pub kill_reward: u32,
    pub upgrade_cost: u32,
    pub upgrade_damage: u32,
    pub shot_cooldown_ms: u64,
    pub bullet_speed: f32,
    pub hit_radius: f32,
    /// A wave spawns `base_enemies_per_wave + wave` enemies.
    pub base_enemies_per_wave: u32,
    pub path_length: usize,
    pub path_spacing: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            starting_base_health: 500,
            starting_gold: 100,
            world_width: 800,
            world_height: 600,
            fps: 60,
            wave_bonus: 10,
            kill_reward: 5,
            upgrade_cost: 50,
            upgrade_damage: 5,
            shot_cooldown_ms: 1000,
            bullet_speed: 5.0,
            hit_radius: 10.0,
            base_enemies_per_wave: 5,
            path_length: 60,
            path_spacing: 10.0,
        }
    }
}

impl Rules {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let rules: Rules = toml::from_str(contents)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".into()));
        }
        if !(self.bullet_speed > 0.0) {
            return Err(ConfigError::Invalid("bullet_speed must be positive".into()));
        }
        if !(self.hit_radius > 0.0) {
            return Err(ConfigError::Invalid("hit_radius must be positive".into()));
        }
        if self.world_width == 0 || self.world_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "world must be non-empty, got {}x{}",
                self.world_width, self.world_height
            )));
        }
        if self.path_length == 0 {
            return Err(ConfigError::Invalid("path_length must be positive".into()));
        }
        Ok(())
    }
}
