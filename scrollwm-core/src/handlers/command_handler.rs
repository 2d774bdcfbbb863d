#![allow(clippy::wildcard_imports)]

use super::*;
use crate::command::Command;
use crate::layouts::LayoutOptions;
use crate::models::{TilingId, WindowHandle, WindowState};
use crate::utils::helpers;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Processes a command and invokes the associated function.
    pub fn command_handler(&mut self, command: &Command<H>) -> bool {
        process_internal(self, command).unwrap_or(false)
    }

    /// Read the configuration again and rebuild every tiling, keeping the
    /// column order the host remembers.
    pub fn reload(&mut self) -> bool {
        self.state.load_config(&self.config);
        let count = self.config.workspace_count();
        if count != self.state.registry.workspace_count() {
            self.workspace_count_changed_handler(count);
        }
        let margins = (
            self.state.settings.vertical_margin,
            self.state.settings.vertical_margin_bottom,
        );
        self.state.registry.set_vertical_margins(margins);

        let workspaces: Vec<TilingId> = self.state.registry.tilings().map(|t| t.workspace).collect();
        for id in workspaces {
            let Some(order) = self.display_server.persisted_order(id) else {
                continue;
            };
            let windows = &self.state.windows;
            let Some(tiling) = self.state.registry.tiling_mut(id) else {
                continue;
            };
            tiling.columns.sort_by_key(|column| {
                column
                    .top()
                    .and_then(|h| windows.get(&h)?.fingerprint.as_ref())
                    .and_then(|f| order.iter().position(|o| o == f))
                    .unwrap_or(usize::MAX)
            });
            self.state.actions.push_back(DisplayAction::ColumnChanged(id));
        }

        self.layout_all();
        let shown: Vec<(TilingId, WindowHandle<H>)> = self
            .state
            .registry
            .tilings()
            .filter(|t| !t.is_detached())
            .filter_map(|t| Some((t.workspace, t.selected()?)))
            .collect();
        let focused = self.state.focused_tiling;
        for (id, selected) in shown {
            self.state.ensure_viewport(id, &selected, true);
        }
        self.state.focused_tiling = focused;
        tracing::info!("Configuration reloaded");
        true
    }
}

fn process_internal<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
    command: &Command<H>,
) -> Option<bool> {
    match command {
        Command::Switch(direction) => Some(manager.switch(*direction)),
        Command::SwitchFirst => Some(manager.switch_first()),
        Command::SwitchLast => Some(manager.switch_last()),
        Command::Swap(direction) => {
            let (_, handle) = manager.state.selected()?;
            Some(manager.swap(*direction, &handle))
        }
        Command::Slurp => Some(manager.slurp()),
        Command::Barf => Some(manager.barf()),

        Command::ResizeByDelta { dw, dh } => resize_by_delta(manager, *dw, *dh),
        Command::ToggleMaximize => toggle_maximize(manager),
        Command::CycleWidth => cycle_width(manager),
        Command::CycleHeight => cycle_height(manager),
        Command::Center => {
            let (id, handle) = manager.state.selected()?;
            manager.state.center(id, &handle)?;
            Some(true)
        }
        Command::ToggleFullScreen => toggle_fullscreen(manager),
        Command::Reload => Some(manager.reload()),

        Command::BeginDrag(handle) => Some(manager.begin_drag(handle)),
        Command::DragMotion(x, y) => Some(manager.drag_motion(*x, *y)),
        Command::EndDrag => Some(manager.end_drag()),
    }
}

/// Lay out the tiling of the selection after its size hints changed.
fn apply_hints<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
    id: TilingId,
    handle: &WindowHandle<H>,
    force: bool,
) -> Option<bool> {
    manager.layout_tiling(id, &LayoutOptions::default());
    manager.state.ensure_viewport(id, handle, force);
    Some(true)
}

fn resize_by_delta<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
    dw: i32,
    dh: i32,
) -> Option<bool> {
    let (id, handle) = manager.state.selected()?;
    let min_height = manager.state.settings.min_window_height;
    let window = manager.state.windows.get_mut(&handle)?;
    window.desired_width = Some((window.current_width() + dw).max(1));
    window.desired_height = Some((window.current_height() + dh).max(min_height));
    apply_hints(manager, id, &handle, false)
}

fn toggle_maximize<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
) -> Option<bool> {
    let (id, handle) = manager.state.selected()?;
    let area = manager.state.registry.tiling(id)?.area();
    let full = area.w() - 2 * manager.state.settings.minimum_margin;
    let window = manager.state.windows.get_mut(&handle)?;
    let maximize = !window.has_state(WindowState::MaximizedHorz);
    if maximize {
        window.unmaximized_width = Some(window.current_width());
        window.desired_width = Some(full);
    } else {
        window.desired_width = window.unmaximized_width.take();
    }
    window.set_state(WindowState::MaximizedHorz, maximize);
    manager.state.actions.push_back(DisplayAction::SetState(
        handle,
        maximize,
        WindowState::MaximizedHorz,
    ));
    apply_hints(manager, id, &handle, true)
}

fn cycle_width<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
) -> Option<bool> {
    let (id, handle) = manager.state.selected()?;
    let area = manager.state.registry.tiling(id)?.area();
    let presets = preset_sizes(&manager.state.settings.width_presets, area.w());
    let window = manager.state.windows.get_mut(&handle)?;
    let next = helpers::find_next(window.current_width(), &presets)?;
    window.desired_width = Some(next);
    window.unmaximized_width = None;
    window.set_state(WindowState::MaximizedHorz, false);
    apply_hints(manager, id, &handle, false)
}

fn cycle_height<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
) -> Option<bool> {
    let (id, handle) = manager.state.selected()?;
    let area = manager.state.registry.tiling(id)?.area();
    let presets = preset_sizes(&manager.state.settings.height_presets, area.h());
    let window = manager.state.windows.get_mut(&handle)?;
    window.desired_height = Some(helpers::find_next(window.current_height(), &presets)?);
    apply_hints(manager, id, &handle, false)
}

/// Preset fractions turned into pixels of `total`.
fn preset_sizes(fractions: &[f32], total: i32) -> Vec<i32> {
    let mut sizes: Vec<i32> = fractions
        .iter()
        .map(|p| (p * total as f32).floor() as i32)
        .filter(|size| *size > 0)
        .collect();
    sizes.dedup();
    sizes
}

fn toggle_fullscreen<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
) -> Option<bool> {
    let (id, handle) = manager.state.selected()?;
    let window = manager.state.windows.get_mut(&handle)?;
    let fullscreen = !window.is_fullscreen();
    window.set_state(WindowState::Fullscreen, fullscreen);
    manager.state.actions.push_back(DisplayAction::SetState(
        handle,
        fullscreen,
        WindowState::Fullscreen,
    ));
    apply_hints(manager, id, &handle, true)
}
