use super::Config;
use scrollwm_core::InsertBehavior;

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            workspaces: 9,
            gap: 10,
            horizontal_margin: 20,
            vertical_margin: 0,
            vertical_margin_bottom: 0,
            minimum_margin: 10,
            min_window_height: 50,
            column_zone_margin: 100,
            row_zone_margin: 250,
            animation_duration: 250,
            width_presets: vec![0.381_95, 0.5, 0.618_04],
            height_presets: vec![1.0 / 3.0, 0.5, 2.0 / 3.0],
            insert_behavior: InsertBehavior::AfterCurrent,
            focus_new_windows: true,
            preview_stack_offset: 40,
        }
    }
}
