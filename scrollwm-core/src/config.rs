mod insert_behavior;

pub use insert_behavior::InsertBehavior;
use crate::utils::helpers;
use serde::{Deserialize, Serialize};

/// Everything the embedding application has to provide.
pub trait Config {
    fn workspace_count(&self) -> usize;

    /// Space between columns and between rows.
    fn window_gap(&self) -> i32;

    /// Distance kept between the viewport edges and a column snapped to them.
    fn horizontal_margin(&self) -> i32;

    fn vertical_margin(&self) -> i32;

    fn vertical_margin_bottom(&self) -> i32;

    /// How much of a neighbouring column stays visible.
    fn minimum_margin(&self) -> i32;

    fn min_window_height(&self) -> i32;

    fn column_zone_margin(&self) -> i32;

    fn row_zone_margin(&self) -> i32;

    /// Duration of scroll and placement animations, in milliseconds.
    fn animation_duration(&self) -> u32;

    /// Fractions of the work area width `CycleWidth` steps through.
    fn width_presets(&self) -> Vec<f32>;

    /// Fractions of the work area height `CycleHeight` steps through.
    fn height_presets(&self) -> Vec<f32>;

    fn insert_behavior(&self) -> InsertBehavior;

    fn focus_new_windows(&self) -> bool;

    /// Vertical offset between stacked tilings in the workspace switch preview.
    fn preview_stack_offset(&self) -> i32;
}

/// Snapshot of a [`Config`] the model works with.
#[allow(clippy::module_name_repetitions)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub gap: i32,
    pub horizontal_margin: i32,
    pub vertical_margin: i32,
    pub vertical_margin_bottom: i32,
    pub minimum_margin: i32,
    pub min_window_height: i32,
    pub column_zone_margin: i32,
    pub row_zone_margin: i32,
    pub animation_duration: u32,
    pub width_presets: Vec<f32>,
    pub height_presets: Vec<f32>,
    pub insert_behavior: InsertBehavior,
    pub focus_new_windows: bool,
    pub preview_stack_offset: i32,
}

impl Settings {
    pub fn new(config: &impl Config) -> Self {
        let sorted = |mut presets: Vec<f32>| {
            presets.retain(|p| *p > 0.0 && *p <= 1.0);
            presets.sort_by(f32::total_cmp);
            presets.dedup_by(|a, b| helpers::float_eq(*a, *b));
            presets
        };
        Self {
            gap: config.window_gap().max(0),
            horizontal_margin: config.horizontal_margin().max(0),
            vertical_margin: config.vertical_margin().max(0),
            vertical_margin_bottom: config.vertical_margin_bottom().max(0),
            minimum_margin: config.minimum_margin().max(0),
            min_window_height: config.min_window_height().max(1),
            column_zone_margin: config.column_zone_margin().max(0),
            row_zone_margin: config.row_zone_margin().max(0),
            animation_duration: config.animation_duration(),
            width_presets: sorted(config.width_presets()),
            height_presets: sorted(config.height_presets()),
            insert_behavior: config.insert_behavior(),
            focus_new_windows: config.focus_new_windows(),
            preview_stack_offset: config.preview_stack_offset(),
        }
    }
}
