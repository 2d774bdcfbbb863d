//! `scrollwm` general configuration

mod checks;
mod default;

use crate::utils::file_handler;
use scrollwm_core::InsertBehavior;
use serde::{Deserialize, Serialize};

/// Everything that can be set in `config.toml`. Missing keys take their
/// default value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// `EnvFilter` directives, eg. `"info"` or `"scrollwm_core=trace"`.
    pub log_level: String,
    pub workspaces: usize,
    pub gap: i32,
    pub horizontal_margin: i32,
    pub vertical_margin: i32,
    pub vertical_margin_bottom: i32,
    pub minimum_margin: i32,
    pub min_window_height: i32,
    pub column_zone_margin: i32,
    pub row_zone_margin: i32,
    /// Milliseconds.
    pub animation_duration: u32,
    pub width_presets: Vec<f32>,
    pub height_presets: Vec<f32>,
    pub insert_behavior: InsertBehavior,
    pub focus_new_windows: bool,
    pub preview_stack_offset: i32,
}

/// Load the user's configuration, falling back to the defaults when it
/// cannot be read.
#[must_use]
pub fn load() -> Config {
    file_handler::load_config_file(None).unwrap_or_else(|err| {
        tracing::error!("Unable to load config: {}", err);
        Config::default()
    })
}

impl scrollwm_core::Config for Config {
    fn workspace_count(&self) -> usize {
        self.workspaces
    }

    fn window_gap(&self) -> i32 {
        self.gap
    }

    fn horizontal_margin(&self) -> i32 {
        self.horizontal_margin
    }

    fn vertical_margin(&self) -> i32 {
        self.vertical_margin
    }

    fn vertical_margin_bottom(&self) -> i32 {
        self.vertical_margin_bottom
    }

    fn minimum_margin(&self) -> i32 {
        self.minimum_margin
    }

    fn min_window_height(&self) -> i32 {
        self.min_window_height
    }

    fn column_zone_margin(&self) -> i32 {
        self.column_zone_margin
    }

    fn row_zone_margin(&self) -> i32 {
        self.row_zone_margin
    }

    fn animation_duration(&self) -> u32 {
        self.animation_duration
    }

    fn width_presets(&self) -> Vec<f32> {
        self.width_presets.clone()
    }

    fn height_presets(&self) -> Vec<f32> {
        self.height_presets.clone()
    }

    fn insert_behavior(&self) -> InsertBehavior {
        self.insert_behavior
    }

    fn focus_new_windows(&self) -> bool {
        self.focus_new_windows
    }

    fn preview_stack_offset(&self) -> i32 {
        self.preview_stack_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollwm_core::Settings;

    #[test]
    fn missing_keys_take_their_default() {
        let config: Config = toml::from_str("gap = 4\ninsert_behavior = \"First\"").unwrap();
        assert_eq!(config.gap, 4);
        assert_eq!(config.insert_behavior, InsertBehavior::First);
        assert_eq!(config.workspaces, Config::default().workspaces);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn default_config_survives_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
    }

    #[test]
    fn settings_follow_the_config() {
        let config = Config {
            gap: -3,
            width_presets: vec![0.75, 0.25],
            ..Config::default()
        };
        let settings = Settings::new(&config);
        assert_eq!(settings.gap, 0);
        assert_eq!(settings.width_presets, vec![0.25, 0.75]);
    }
}
