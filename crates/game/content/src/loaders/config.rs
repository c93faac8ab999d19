//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use tactics_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content).context("Failed to parse config TOML")?;

        if config.move_speed.is_nan() || config.move_speed <= 0.0 {
            anyhow::bail!("move_speed must be positive, got {}", config.move_speed);
        }
        if config.game_over_delay < 0.0 {
            anyhow::bail!(
                "game_over_delay must not be negative, got {}",
                config.game_over_delay
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::PlayerId;

    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("starting_player = \"Player2\"\n").unwrap();
        assert_eq!(config.starting_player, PlayerId::Player2);
        assert_eq!(config.move_speed, GameConfig::DEFAULT_MOVE_SPEED);
        assert!(!config.purchased_units_ready);
    }

    #[test]
    fn rejects_a_stalled_move_speed() {
        assert!(ConfigLoader::parse("move_speed = 0.0\n").is_err());
    }
}
