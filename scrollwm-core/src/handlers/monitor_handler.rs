use super::*;
use crate::layouts::LayoutOptions;
use crate::models::{Monitor, MonitorId, Proxy, WorkspaceId};

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// The set of monitors changed. Tilings follow their monitors where they
    /// can, the rest get detached.
    pub fn monitors_changed_handler(&mut self, monitors: Vec<Monitor>) -> bool {
        let changed = self.state.registry.set_monitors(monitors);
        self.relayout(&changed);
        true
    }

    /// Workspaces past `count` are destroyed, their windows move to the last
    /// workspace left.
    pub fn workspace_count_changed_handler(&mut self, count: usize) -> bool {
        let removed = self.state.registry.set_workspace_count(count);
        if removed.is_empty() {
            return false;
        }
        let home = count.checked_sub(1);
        for (workspace, handles) in removed {
            tracing::debug!(
                "Workspace {} removed, moving {} windows to {:?}",
                workspace,
                handles.len(),
                home
            );
            for handle in handles {
                self.rehome(handle, home);
            }
        }
        self.layout_all();
        self.refocus();
        true
    }

    fn rehome(&mut self, handle: crate::models::WindowHandle<H>, home: Option<WorkspaceId>) {
        let tiling = home.and_then(|id| self.state.registry.ensure(id));
        let Some(window) = self.state.windows.get_mut(&handle) else {
            return;
        };
        match tiling {
            Some(tiling) => {
                window.workspace = tiling.workspace;
                let end = tiling.len();
                tiling.insert_column(end, handle);
            }
            None => window.placement = crate::models::Placement::Floating,
        }
    }

    /// Show `workspace` on `monitor`.
    pub fn active_workspace_changed_handler(
        &mut self,
        monitor: MonitorId,
        workspace: WorkspaceId,
    ) -> bool {
        let changed = self.state.registry.show(monitor, workspace);
        if self.state.registry.workspace_on(monitor) == Some(workspace) {
            self.state.focused_tiling = Some(workspace);
        }
        self.relayout(&changed);
        !changed.is_empty()
    }

    fn relayout(&mut self, changed: &[WorkspaceId]) {
        let focused = self.state.focused_tiling;
        for id in changed {
            let Some(tiling) = self.state.registry.tiling(*id) else {
                continue;
            };
            if tiling.is_detached() {
                if self.state.transitions.cancel(Proxy::Container(*id)).is_some() {
                    self.state
                        .actions
                        .push_back(DisplayAction::CancelTransition(Proxy::Container(*id)));
                }
                continue;
            }
            let selected = tiling.selected();
            self.layout_tiling(*id, &LayoutOptions::default());
            if let Some(selected) = selected {
                self.state.ensure_viewport(*id, &selected, true);
            }
        }
        self.state.focused_tiling = focused;
        self.refocus();
    }

    /// Move focus to the first monitor when the focused tiling is not shown.
    fn refocus(&mut self) {
        let visible = self
            .state
            .focused_tiling
            .and_then(|id| self.state.registry.tiling(id))
            .map_or(false, |t| !t.is_detached());
        if !visible {
            self.state.focused_tiling = self
                .state
                .registry
                .monitors()
                .first()
                .and_then(|m| self.state.registry.workspace_on(m.id));
        }
    }
}
