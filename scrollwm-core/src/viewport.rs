//! Scrolling tilings so the selected window is in view.
//!
//! A tiling's selection and scroll offset are only ever changed here, always
//! together.
use crate::config::Settings;
use crate::models::{Handle, Proxy, TilingId, Tiling, WindowHandle, Xyhw};
use crate::state::State;
use crate::DisplayAction;

/// Convert a point in the tiling's scroll space to the screen.
pub fn scroll_to_screen<H: Handle>(tiling: &Tiling<H>, x: i32, y: i32) -> (i32, i32) {
    let screen = tiling.screen();
    (screen.x() + tiling.target_x() + x, screen.y() + y)
}

/// Convert a screen point to the tiling's scroll space.
pub fn screen_to_scroll<H: Handle>(tiling: &Tiling<H>, x: i32, y: i32) -> (i32, i32) {
    let screen = tiling.screen();
    (x - screen.x() - tiling.target_x(), y - screen.y())
}

/// A column as seen through the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    /// Left edge, viewport local.
    pub x: i32,
    pub width: i32,
    pub first: bool,
    pub last: bool,
}

/// Where the left edge of a column should be so it is nicely in view.
pub fn ensured_x(span: ColumnSpan, fullscreen: bool, area: Xyhw, settings: &Settings) -> i32 {
    let ColumnSpan {
        x,
        width,
        first,
        last,
    } = span;
    let left = area.x() + settings.horizontal_margin;
    let right = area.right() - settings.horizontal_margin;
    let too_wide = f64::from(area.w()) * 0.9
        - f64::from(2 * (settings.horizontal_margin + settings.gap));

    if fullscreen {
        0
    } else if first && x <= left {
        left
    } else if last && x + width >= right {
        right - width
    } else if f64::from(width) > too_wide {
        area.x() + (area.w() - width) / 2
    } else if x + width > right {
        right - width
    } else if x < left {
        left
    } else if x + width == area.right() {
        area.right() - settings.minimum_margin - width
    } else if x == area.x() {
        area.x() + settings.minimum_margin
    } else {
        x
    }
}

impl<H: Handle> State<H> {
    /// The viewport position `handle`'s column should be scrolled to.
    #[must_use]
    pub fn ensured_x(&self, tiling: TilingId, handle: &WindowHandle<H>) -> Option<i32> {
        let tiling = self.registry.tiling(tiling)?;
        let index = tiling.column_of(handle)?;
        let column = tiling.columns.get(index)?;
        let window = self.windows.get(handle)?;
        let width = if column.width > 0 {
            column.width
        } else {
            window.width()
        };
        let span = ColumnSpan {
            x: column.x + tiling.target_x(),
            width,
            first: index == 0,
            last: index + 1 == tiling.len(),
        };
        Some(ensured_x(
            span,
            window.is_fullscreen(),
            tiling.area(),
            &self.settings,
        ))
    }

    /// Scroll so the column of `handle` starts at viewport position `x`.
    ///
    /// Without a change in offset and without `force` the move completes
    /// right away.
    pub fn move_to(
        &mut self,
        tiling: TilingId,
        handle: &WindowHandle<H>,
        x: i32,
        force: bool,
    ) -> Option<()> {
        let t = self.registry.tiling(tiling)?;
        let column = t.columns.get(t.column_of(handle)?)?;
        let target = x - column.x;
        if target == t.target_x() && !force {
            self.actions.push_back(DisplayAction::MoveComplete(tiling));
            return Some(());
        }
        self.scroll_container(tiling, target)
    }

    fn scroll_container(&mut self, id: TilingId, target: i32) -> Option<()> {
        let tiling = self.registry.tiling_mut(id)?;
        tiling.set_target_x(target);
        if tiling.is_detached() {
            return Some(());
        }
        tiling.animating = true;
        let (transition, superseded) = self.transitions.start(Proxy::Container(id));
        tracing::trace!(
            "Scrolling tiling {} to {} (superseding {:?})",
            id,
            target,
            superseded
        );
        self.actions.push_back(DisplayAction::SetVisualPosition {
            proxy: Proxy::Container(id),
            x: target,
            y: 0,
            animated: true,
            duration_ms: self.settings.animation_duration,
            transition: Some(transition),
        });
        Some(())
    }

    /// Select `handle` and scroll it into view.
    ///
    /// Returns false when the window is not part of the tiling.
    pub fn ensure_viewport(&mut self, tiling: TilingId, handle: &WindowHandle<H>, force: bool) -> bool {
        let Some(t) = self.registry.tiling_mut(tiling) else {
            return false;
        };
        if !t.contains(handle) {
            return false;
        }
        t.set_selected(Some(*handle));
        self.focused_tiling = Some(tiling);
        let Some(x) = self.ensured_x(tiling, handle) else {
            return false;
        };
        self.move_to(tiling, handle, x, force);
        self.raise(handle);
        tracing::debug!("Selected {:?} on tiling {}", handle, tiling);
        self.actions
            .push_back(DisplayAction::SelectionChanged(*handle));
        true
    }

    /// Drop the selection of a tiling that has nothing left to select.
    pub(crate) fn clear_selection(&mut self, tiling: TilingId) {
        if let Some(t) = self.registry.tiling_mut(tiling) {
            t.set_selected(None);
        }
    }

    /// Center the column of `handle` in the viewport.
    pub fn center(&mut self, tiling: TilingId, handle: &WindowHandle<H>) -> Option<()> {
        let t = self.registry.tiling(tiling)?;
        let width = t.columns.get(t.column_of(handle)?)?.width;
        let area = t.area();
        self.move_to(tiling, handle, area.x() + (area.w() - width) / 2, false)
    }

    /// Keep a previously centered or edge aligned tiling that way after its
    /// content width changed from `old_width`.
    pub(crate) fn auto_scroll(&mut self, id: TilingId, old_width: i32) -> Option<()> {
        let tiling = self.registry.tiling(id)?;
        let area = tiling.area();
        let target_x = tiling.target_x();
        let width = tiling.content_width;
        if width == old_width || tiling.is_empty() {
            return None;
        }
        let aligned = target_x + old_width >= area.w() && target_x <= 0;
        let centered = target_x == area.x() + (area.w() - old_width) / 2;
        if !(aligned || centered) {
            return None;
        }
        let target = if width < area.w() {
            area.x() + (area.w() - width) / 2
        } else if target_x + width < area.w() {
            area.w() - width
        } else {
            return None;
        };
        if target == target_x {
            return None;
        }
        self.scroll_container(id, target)
    }

    /// A scroll transition of `id` finished: put the real windows where
    /// their clones are.
    pub(crate) fn complete_scroll(&mut self, id: TilingId) -> Option<()> {
        self.registry.tiling_mut(id)?.animating = false;
        self.place_windows(id);
        self.actions.push_back(DisplayAction::MoveComplete(id));
        Some(())
    }

    /// Ask the host to move every window of a tiling to its screen position.
    pub(crate) fn place_windows(&mut self, id: TilingId) -> Option<()> {
        let tiling = self.registry.tiling(id)?;
        if tiling.is_detached() {
            return None;
        }
        for handle in tiling.windows() {
            let Some(window) = self.windows.get(handle) else {
                continue;
            };
            if window.is_fullscreen() {
                continue;
            }
            let (x, y) = scroll_to_screen(tiling, window.scroll.0, window.scroll.1);
            if (window.frame.x(), window.frame.y()) != (x, y) {
                self.actions
                    .push_back(DisplayAction::RequestMove(*handle, x, y));
            }
        }
        Some(())
    }
}
