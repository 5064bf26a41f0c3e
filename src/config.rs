//! Player tuning parameters.
//!
//! Every field has a default matching the shipped sprite sheet and balance,
//! so a config file only needs to list what it overrides.

use std::path::Path;

use serde::Deserialize;

use crate::components::Color;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: f32,
    pub max_stamina: f32,
    pub max_mana: f32,
    /// Stamina and mana restored per frame while idle.
    pub regen_rate: f32,
    /// Stamina spent per frame of movement.
    pub move_stamina_cost: f32,
    /// Mana spent per frame of attacking.
    pub attack_mana_cost: f32,
    /// Stamina spent per frame behind the shield.
    pub shield_stamina_cost: f32,
    pub shield_radius: f32,
    pub shield_color: [u8; 4],
    /// Distance per frame on a cardinal axis.
    pub walk_speed: f32,
    /// Half the sprite size; keeps the sprite fully on screen.
    pub body_radius: f32,
    pub collider_radius: f32,
    pub starting_lives: u8,
    pub sprite_sheet: String,
}

impl PlayerConfig {
    pub const DEFAULT_SPRITE_SHEET: &'static str = "./assets/player_sprite_sheet.png";

    pub fn new() -> Self {
        Self {
            max_health: 100.0,
            max_stamina: 100.0,
            max_mana: 100.0,
            regen_rate: 0.5,
            move_stamina_cost: 0.05,
            attack_mana_cost: 1.0,
            shield_stamina_cost: 0.05,
            shield_radius: 90.0,
            shield_color: [0, 255, 128, 128],
            walk_speed: 2.0,
            body_radius: 32.0,
            collider_radius: 10.0,
            starting_lives: 4,
            sprite_sheet: Self::DEFAULT_SPRITE_SHEET.to_string(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn shield_color(&self) -> Color {
        let [r, g, b, a] = self.shield_color;
        Color::rgba(r, g, b, a)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new()
    }
}
