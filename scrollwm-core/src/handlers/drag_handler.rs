use super::*;
use crate::layouts::LayoutOptions;
use crate::models::{DragOrigin, DragState, Mode, Placement, Proxy, WindowHandle};
use crate::zones::{select_dnd_zone, DndZone, ZoneTarget};

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Take a window out of its column to move it around with the pointer.
    pub fn begin_drag(&mut self, handle: &WindowHandle<H>) -> bool {
        if matches!(self.state.mode, Mode::Dragging(_)) {
            return false;
        }
        let Some(id) = self.state.tiling_of(handle) else {
            return false;
        };
        let Some(tiling) = self.state.registry.tiling(id) else {
            return false;
        };
        let Some(position) = tiling.position_of(handle) else {
            return false;
        };
        let Some(window) = self.state.windows.get(handle) else {
            return false;
        };
        let origin = DragOrigin {
            tiling: id,
            column: position.column,
            row: position.row,
            alone: tiling.columns[position.column].len() == 1,
            rect: window.frame,
        };

        if self.state.transitions.cancel(Proxy::Container(id)).is_some() {
            self.state
                .actions
                .push_back(DisplayAction::CancelTransition(Proxy::Container(id)));
            if let Some(tiling) = self.state.registry.tiling_mut(id) {
                tiling.animating = false;
            }
        }
        if let Some(window) = self.state.windows.get_mut(handle) {
            window.placement = Placement::Detached;
        }
        self.remove_from_tiling(id, handle);
        tracing::debug!("Dragging {:?} out of tiling {}", handle, id);

        self.state.mode = Mode::Dragging(DragState {
            window: *handle,
            origin,
            zone: None,
            indicator: None,
            initial: true,
        });
        self.state.raise(handle);
        true
    }

    /// The pointer moved to the screen point `(x, y)` while dragging.
    /// Returns true when the active zone changed.
    pub fn drag_motion(&mut self, x: i32, y: i32) -> bool {
        let Mode::Dragging(mut drag) = self.state.mode.clone() else {
            return false;
        };
        let zone = self
            .state
            .registry
            .workspace_at(x, y)
            .and_then(|id| self.state.registry.tiling(id))
            .and_then(|t| select_dnd_zone(t, &self.state.windows, &self.state.settings, x, y));
        if zone == drag.zone {
            return false;
        }

        self.dismiss_zone(&drag);
        drag.indicator = None;
        if let Some(zone) = zone {
            drag.indicator = Some(self.show_zone(&zone, &drag));
            drag.initial = false;
        }
        drag.zone = zone;
        self.state.mode = Mode::Dragging(drag);
        true
    }

    /// Drop the dragged window into the active zone, or back where it came
    /// from when there is none.
    pub fn end_drag(&mut self) -> bool {
        let Mode::Dragging(drag) = std::mem::take(&mut self.state.mode) else {
            return false;
        };
        self.dismiss_zone(&drag);
        let handle = drag.window;

        let dropped = drag.zone.and_then(|zone| {
            let tiling = self.state.registry.tiling_mut(zone.tiling)?;
            match zone.target {
                ZoneTarget::Column(column) => {
                    tiling.insert_column(column, handle);
                }
                ZoneTarget::Row { column, row } => {
                    tiling.insert_row(column, row, handle);
                }
            }
            Some(zone.tiling)
        });
        let Some(id) = dropped.or_else(|| self.restore_origin(handle, drag.origin)) else {
            tracing::warn!("Nowhere to put {:?} back, leaving it floating", handle);
            if let Some(window) = self.state.windows.get_mut(&handle) {
                window.placement = Placement::Floating;
            }
            return true;
        };
        tracing::debug!("Dropped {:?} on tiling {}", handle, id);

        if let Some(window) = self.state.windows.get_mut(&handle) {
            window.placement = Placement::Tiled;
            window.workspace = id;
        }
        self.state.actions.push_back(DisplayAction::ColumnChanged(id));
        self.layout_tiling(id, &LayoutOptions::default());
        self.state.ensure_viewport(id, &handle, true);
        true
    }

    /// Forget about a drag whose window went away.
    pub(crate) fn abort_drag(&mut self) {
        if let Mode::Dragging(drag) = std::mem::take(&mut self.state.mode) {
            self.dismiss_zone(&drag);
        }
    }

    fn restore_origin(&mut self, handle: WindowHandle<H>, origin: DragOrigin) -> Option<usize> {
        let tiling = self.state.registry.ensure(origin.tiling)?;
        if origin.alone {
            tiling.insert_column(origin.column, handle);
        } else {
            tiling.insert_row(origin.column, origin.row, handle);
        }
        Some(origin.tiling)
    }

    /// Shrink the indicator of the active zone away.
    fn dismiss_zone(&mut self, drag: &DragState<H>) {
        let (Some(zone), Some(indicator)) = (drag.zone, drag.indicator) else {
            return;
        };
        let proxy = Proxy::ZoneIndicator(indicator);
        let (transition, _) = self.state.transitions.start(proxy);
        self.state.dismissed_indicators.push(indicator);
        self.state.actions.push_back(DisplayAction::SetVisualGeometry {
            proxy,
            rect: zone.collapsed(),
            animated: true,
            duration_ms: self.state.settings.animation_duration,
            transition: Some(transition),
        });
        self.state
            .actions
            .push_back(DisplayAction::ZoneDeactivated(zone));
    }

    /// Grow a new indicator for `zone`. The first one of a drag grows out
    /// of the dragged window.
    fn show_zone(&mut self, zone: &DndZone, drag: &DragState<H>) -> u64 {
        let indicator = self.state.new_indicator();
        let proxy = Proxy::ZoneIndicator(indicator);
        let from = if drag.initial {
            drag.origin.rect
        } else {
            zone.collapsed()
        };
        self.state.actions.push_back(DisplayAction::SetVisualGeometry {
            proxy,
            rect: from,
            animated: false,
            duration_ms: 0,
            transition: None,
        });
        let (transition, _) = self.state.transitions.start(proxy);
        self.state.actions.push_back(DisplayAction::SetVisualGeometry {
            proxy,
            rect: zone.indicator(self.state.settings.gap.max(4)),
            animated: true,
            duration_ms: self.state.settings.animation_duration,
            transition: Some(transition),
        });
        self.state.actions.push_back(DisplayAction::ZoneActivated(*zone));
        indicator
    }
}
