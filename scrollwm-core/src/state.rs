//! The model's state: windows, tilings and queued actions.

use crate::config::{Config, Settings};
use crate::errors::{CoreError, Result};
use crate::models::{
    Handle, Mode, MonitorId, Registry, Tiling, TilingId, Transitions, Window, WindowHandle,
    WorkspaceId, Xyhw,
};
use crate::DisplayAction;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

#[derive(Serialize, Deserialize, Debug)]
pub struct State<H: Handle> {
    #[serde(bound = "")]
    pub windows: HashMap<WindowHandle<H>, Window<H>>,
    #[serde(bound = "")]
    pub registry: Registry<H>,
    #[serde(bound = "")]
    pub mode: Mode<H>,
    #[serde(bound = "")]
    pub transitions: Transitions<H>,
    #[serde(bound = "")]
    pub actions: VecDeque<DisplayAction<H>>,
    pub settings: Settings,
    /// Tiling commands act on.
    pub focused_tiling: Option<TilingId>,
    pub(crate) raise_serial: u64,
    pub(crate) next_indicator: u64,
    /// Zone indicators shrinking away, destroyed when their transition ends.
    pub(crate) dismissed_indicators: Vec<u64>,
}

impl<H: Handle> State<H> {
    pub(crate) fn new(config: &impl Config) -> Self {
        let settings = Settings::new(config);
        Self {
            windows: HashMap::new(),
            registry: Registry::new(
                config.workspace_count(),
                (settings.vertical_margin, settings.vertical_margin_bottom),
            ),
            mode: Mode::default(),
            transitions: Transitions::default(),
            actions: VecDeque::new(),
            settings,
            focused_tiling: None,
            raise_serial: 0,
            next_indicator: 0,
            dismissed_indicators: vec![],
        }
    }

    pub(crate) fn load_config(&mut self, config: &impl Config) {
        self.settings = Settings::new(config);
    }

    pub fn window(&self, handle: &WindowHandle<H>) -> Result<&Window<H>> {
        self.windows
            .get(handle)
            .ok_or_else(|| CoreError::unknown_window(handle))
    }

    pub fn tiling(&self, id: TilingId) -> Result<&Tiling<H>> {
        self.registry.tiling(id).ok_or(CoreError::UnknownTiling(id))
    }

    /// The tiling a window is tiled in.
    #[must_use]
    pub fn tiling_of(&self, handle: &WindowHandle<H>) -> Option<TilingId> {
        self.registry.tiling_of(handle).map(|t| t.workspace)
    }

    /// The selected window of the focused tiling.
    #[must_use]
    pub fn selected(&self) -> Option<(TilingId, WindowHandle<H>)> {
        let tiling = self.focused_tiling?;
        Some((tiling, self.registry.tiling(tiling)?.selected()?))
    }

    /// Put a window on top of the stacking order.
    pub fn raise(&mut self, handle: &WindowHandle<H>) -> Option<()> {
        let window = self.windows.get_mut(handle)?;
        self.raise_serial += 1;
        window.raised = self.raise_serial;
        self.actions.push_back(DisplayAction::RaiseWindow(*handle));
        Some(())
    }

    /// The most recently raised window of a column.
    #[must_use]
    pub fn most_recently_raised(&self, handles: &[WindowHandle<H>]) -> Option<WindowHandle<H>> {
        // Ties go to the topmost window.
        handles
            .iter()
            .rev()
            .filter_map(|h| self.windows.get(h))
            .max_by_key(|w| w.raised)
            .map(|w| w.handle)
    }

    /// Where to draw the workspaces of `monitor` while switching between
    /// them, spaced by the configured stack offset.
    #[must_use]
    pub fn switch_preview(&self, monitor: MonitorId) -> Vec<(WorkspaceId, Xyhw)> {
        self.registry
            .switch_preview(monitor, self.settings.preview_stack_offset)
    }

    pub(crate) fn new_indicator(&mut self) -> u64 {
        self.next_indicator += 1;
        self.next_indicator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::TestConfig;
    use crate::models::{MockHandle, Monitor};

    #[test]
    fn most_recently_raised_wins() {
        let mut state = State::<MockHandle>::new(&TestConfig::default());
        for h in 1..=3 {
            state
                .windows
                .insert(WindowHandle(h), Window::new(WindowHandle(h), 0, Xyhw::default()));
        }
        state.raise(&WindowHandle(3));
        state.raise(&WindowHandle(2));
        let column = [WindowHandle(1), WindowHandle(2), WindowHandle(3)];
        assert_eq!(state.most_recently_raised(&column), Some(WindowHandle(2)));
        assert_eq!(
            state.actions.back(),
            Some(&DisplayAction::RaiseWindow(WindowHandle(2)))
        );
    }

    #[test]
    fn switch_preview_uses_the_configured_offset() {
        let mut state = State::<MockHandle>::new(&TestConfig::default());
        state
            .registry
            .set_monitors(vec![Monitor::new(0, Xyhw::new(0, 0, 1000, 800))]);
        state.registry.show(0, 3);
        let preview = state.switch_preview(0);
        assert_eq!(preview[0], (3, Xyhw::new(0, 0, 1000, 800)));
        assert_eq!(preview[1], (0, Xyhw::new(0, 40, 1000, 800)));
        assert!(state.switch_preview(5).is_empty());
    }

    #[test]
    fn lookups_report_what_is_missing() {
        let state = State::<MockHandle>::new(&TestConfig::default());
        assert!(matches!(
            state.window(&WindowHandle(4)),
            Err(CoreError::UnknownWindow(name)) if name == "4"
        ));
        assert!(matches!(state.tiling(9), Err(CoreError::UnknownTiling(9))));
    }
}
