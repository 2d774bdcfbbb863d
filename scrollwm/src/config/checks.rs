use super::Config;
use tracing_subscriber::EnvFilter;

impl Config {
    /// Run every check. Returns true when nothing is wrong.
    pub fn check_all(&self, verbose: bool) -> bool {
        let log_level = self.check_log_level(verbose);
        let presets = self.check_presets(verbose);
        let margins = self.check_margins(verbose);
        let workspaces = self.check_workspaces(verbose);
        log_level && presets && margins && workspaces
    }

    pub fn check_log_level(&self, verbose: bool) -> bool {
        if verbose {
            println!("Trying to parse log_level.");
        }
        match EnvFilter::builder().parse(&self.log_level) {
            Ok(_) => {
                if verbose {
                    println!("Log level is ok.");
                }
                true
            }
            Err(err) => {
                println!("Log level is invalid: {err}");
                false
            }
        }
    }

    /// Presets are fractions of the work area and must lie in (0, 1].
    pub fn check_presets(&self, verbose: bool) -> bool {
        let mut ok = true;
        for (name, presets) in [
            ("width_presets", &self.width_presets),
            ("height_presets", &self.height_presets),
        ] {
            if verbose {
                println!("Checking {name}: {presets:?}");
            }
            for preset in presets {
                if !(*preset > 0.0 && *preset <= 1.0) {
                    println!("{name} contains {preset}, presets must be in (0, 1] and will be ignored.");
                    ok = false;
                }
            }
        }
        ok
    }

    pub fn check_margins(&self, verbose: bool) -> bool {
        if verbose {
            println!("Checking gap and margins.");
        }
        let mut ok = true;
        for (name, value) in [
            ("gap", self.gap),
            ("horizontal_margin", self.horizontal_margin),
            ("vertical_margin", self.vertical_margin),
            ("vertical_margin_bottom", self.vertical_margin_bottom),
            ("minimum_margin", self.minimum_margin),
            ("column_zone_margin", self.column_zone_margin),
            ("row_zone_margin", self.row_zone_margin),
        ] {
            if value < 0 {
                println!("{name} is {value}, negative values are treated as 0.");
                ok = false;
            }
        }
        if self.min_window_height < 1 {
            println!("min_window_height must be at least 1.");
            ok = false;
        }
        ok
    }

    pub fn check_workspaces(&self, verbose: bool) -> bool {
        if verbose {
            println!("Checking workspace count.");
        }
        if self.workspaces == 0 {
            println!("No workspaces configured, every window will float.");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_default_config_passes_every_check() {
        assert!(Config::default().check_all(false));
    }

    #[test]
    fn invalid_log_levels_are_reported() {
        let config = Config {
            log_level: "scrollwm=loud".to_owned(),
            ..Config::default()
        };
        assert!(!config.check_log_level(false));
    }

    #[test]
    fn presets_outside_the_unit_interval_are_reported() {
        let config = Config {
            height_presets: vec![0.5, 1.5],
            ..Config::default()
        };
        assert!(!config.check_presets(false));
    }

    #[test]
    fn negative_margins_are_reported() {
        let config = Config {
            horizontal_margin: -1,
            ..Config::default()
        };
        assert!(!config.check_margins(false));
        assert!(!config.check_all(false));
    }
}
