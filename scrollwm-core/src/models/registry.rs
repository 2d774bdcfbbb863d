//! Which tiling belongs to which workspace, and which monitor shows it.
use super::{Handle, Monitor, MonitorId, Tiling, WindowHandle, WorkspaceId, Xyhw};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Maps workspaces and monitors to tilings.
///
/// Every live monitor shows exactly one tiling, as long as there are enough
/// workspaces. Tilings that are not assigned are detached and not rendered.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Registry<H: Handle> {
    #[serde(bound = "")]
    tilings: BTreeMap<WorkspaceId, Tiling<H>>,
    monitors: Vec<Monitor>,
    assignments: BTreeMap<MonitorId, WorkspaceId>,
    mru: VecDeque<WorkspaceId>,
    workspace_count: usize,
    /// Set while the topology is being reconciled, blocks pruning.
    suppress_prune: bool,
    /// Top and bottom margins applied to every monitor's work area.
    vertical_margins: (i32, i32),
}

impl<H: Handle> Registry<H> {
    #[must_use]
    pub fn new(workspace_count: usize, vertical_margins: (i32, i32)) -> Self {
        Self {
            tilings: BTreeMap::new(),
            monitors: vec![],
            assignments: BTreeMap::new(),
            mru: VecDeque::new(),
            workspace_count,
            suppress_prune: false,
            vertical_margins,
        }
    }

    #[must_use]
    pub const fn workspace_count(&self) -> usize {
        self.workspace_count
    }

    #[must_use]
    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    #[must_use]
    pub fn tiling(&self, workspace: WorkspaceId) -> Option<&Tiling<H>> {
        self.tilings.get(&workspace)
    }

    pub fn tiling_mut(&mut self, workspace: WorkspaceId) -> Option<&mut Tiling<H>> {
        self.tilings.get_mut(&workspace)
    }

    /// The tiling of a workspace, created on first use.
    pub fn ensure(&mut self, workspace: WorkspaceId) -> Option<&mut Tiling<H>> {
        if workspace >= self.workspace_count {
            return None;
        }
        Some(
            self.tilings
                .entry(workspace)
                .or_insert_with(|| Tiling::new(workspace)),
        )
    }

    pub fn tilings(&self) -> impl Iterator<Item = &Tiling<H>> {
        self.tilings.values()
    }

    /// The tiling holding `handle` in one of its columns.
    #[must_use]
    pub fn tiling_of(&self, handle: &WindowHandle<H>) -> Option<&Tiling<H>> {
        self.tilings.values().find(|t| t.contains(handle))
    }

    #[must_use]
    pub fn workspace_on(&self, monitor: MonitorId) -> Option<WorkspaceId> {
        self.assignments.get(&monitor).copied()
    }

    #[must_use]
    pub fn monitor(&self, id: MonitorId) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn monitor_at(&self, x: i32, y: i32) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.contains_point(x, y))
    }

    /// The workspace shown on the monitor under a screen point.
    #[must_use]
    pub fn workspace_at(&self, x: i32, y: i32) -> Option<WorkspaceId> {
        self.workspace_on(self.monitor_at(x, y)?.id)
    }

    /// Most recently shown workspaces first.
    pub fn mru(&self) -> impl Iterator<Item = WorkspaceId> + '_ {
        self.mru.iter().copied()
    }

    pub fn touch(&mut self, workspace: WorkspaceId) {
        self.mru.retain(|ws| *ws != workspace);
        self.mru.push_front(workspace);
    }

    fn area_for(&self, monitor: &Monitor) -> Xyhw {
        let (top, bottom) = self.vertical_margins;
        monitor.tiling_area(top, bottom)
    }

    fn assign(&mut self, monitor: Monitor, workspace: WorkspaceId) -> Option<()> {
        let area = self.area_for(&monitor);
        self.ensure(workspace)?.assign(&monitor, area);
        self.assignments.insert(monitor.id, workspace);
        Some(())
    }

    fn unassign(&mut self, monitor: MonitorId) -> Option<WorkspaceId> {
        let workspace = self.assignments.remove(&monitor)?;
        if let Some(tiling) = self.tilings.get_mut(&workspace) {
            tiling.detach();
        }
        Some(workspace)
    }

    fn is_assigned(&self, workspace: WorkspaceId) -> bool {
        self.assignments.values().any(|ws| *ws == workspace)
    }

    /// Pick a workspace for a monitor that has none: most recently used
    /// first, then the lowest unused id.
    fn free_workspace(&self) -> Option<WorkspaceId> {
        self.mru
            .iter()
            .copied()
            .filter(|ws| *ws < self.workspace_count)
            .find(|ws| !self.is_assigned(*ws))
            .or_else(|| (0..self.workspace_count).find(|ws| !self.is_assigned(*ws)))
    }

    fn assign_free_monitors(&mut self, changed: &mut Vec<WorkspaceId>) {
        let unassigned: Vec<Monitor> = self
            .monitors
            .iter()
            .filter(|m| !self.assignments.contains_key(&m.id))
            .copied()
            .collect();
        for monitor in unassigned {
            let Some(workspace) = self.free_workspace() else {
                tracing::warn!("No workspace left to show on monitor {}", monitor.id);
                continue;
            };
            if self.assign(monitor, workspace).is_some() {
                self.touch(workspace);
                changed.push(workspace);
            }
        }
    }

    /// Reconcile assignments with a new list of monitors.
    ///
    /// Returns the workspaces whose monitor changed and need a new layout.
    pub fn set_monitors(&mut self, monitors: Vec<Monitor>) -> Vec<WorkspaceId> {
        self.suppress_prune = true;
        let mut changed = vec![];

        let gone: Vec<MonitorId> = self
            .assignments
            .keys()
            .copied()
            .filter(|id| !monitors.iter().any(|m| m.id == *id))
            .collect();
        for id in gone {
            if let Some(workspace) = self.unassign(id) {
                tracing::debug!("Monitor {} went away, detaching workspace {}", id, workspace);
                changed.push(workspace);
            }
        }

        self.monitors = monitors;
        let kept: Vec<(Monitor, WorkspaceId)> = self
            .monitors
            .iter()
            .filter_map(|m| Some((*m, self.workspace_on(m.id)?)))
            .collect();
        for (monitor, workspace) in kept {
            if self.assign(monitor, workspace).is_some() {
                changed.push(workspace);
            }
        }
        self.assign_free_monitors(&mut changed);

        self.suppress_prune = false;
        changed.extend(self.prune().into_iter().map(|(ws, _)| ws));
        changed.sort_unstable();
        changed.dedup();
        changed
    }

    /// Apply new vertical margins to every shown tiling. Returns the
    /// workspaces whose area changed.
    pub fn set_vertical_margins(&mut self, margins: (i32, i32)) -> Vec<WorkspaceId> {
        if self.vertical_margins == margins {
            return vec![];
        }
        self.vertical_margins = margins;
        let shown: Vec<(Monitor, WorkspaceId)> = self
            .monitors
            .iter()
            .filter_map(|m| Some((*m, self.workspace_on(m.id)?)))
            .collect();
        shown
            .into_iter()
            .filter_map(|(monitor, workspace)| {
                self.assign(monitor, workspace)?;
                Some(workspace)
            })
            .collect()
    }

    /// Change the number of workspaces. Tilings of workspaces that no longer
    /// exist are destroyed and their windows returned.
    pub fn set_workspace_count(&mut self, count: usize) -> Vec<(WorkspaceId, Vec<WindowHandle<H>>)> {
        self.workspace_count = count;
        self.prune()
    }

    /// Destroy tilings of workspaces past the workspace count.
    fn prune(&mut self) -> Vec<(WorkspaceId, Vec<WindowHandle<H>>)> {
        if self.suppress_prune {
            return vec![];
        }
        let count = self.workspace_count;
        let doomed: Vec<WorkspaceId> = self.tilings.keys().copied().filter(|ws| *ws >= count).collect();
        let mut removed = vec![];
        for workspace in doomed {
            let monitors: Vec<MonitorId> = self
                .assignments
                .iter()
                .filter(|(_, ws)| **ws == workspace)
                .map(|(m, _)| *m)
                .collect();
            for monitor in monitors {
                self.unassign(monitor);
            }
            if let Some(tiling) = self.tilings.remove(&workspace) {
                removed.push((workspace, tiling.windows().copied().collect()));
            }
        }
        self.mru.retain(|ws| *ws < count);
        if !removed.is_empty() {
            let mut changed = vec![];
            self.assign_free_monitors(&mut changed);
        }
        removed
    }

    /// Show `workspace` on `monitor`.
    ///
    /// When the workspace is already visible on another monitor the two
    /// monitors swap workspaces. Returns the workspaces that moved.
    pub fn show(&mut self, monitor: MonitorId, workspace: WorkspaceId) -> Vec<WorkspaceId> {
        let Some(target) = self.monitor(monitor).copied() else {
            return vec![];
        };
        if workspace >= self.workspace_count {
            return vec![];
        }
        self.touch(workspace);
        let current = self.workspace_on(monitor);
        if current == Some(workspace) {
            return vec![];
        }
        self.suppress_prune = true;
        let mut changed = vec![workspace];
        let other = self
            .assignments
            .iter()
            .find(|(_, ws)| **ws == workspace)
            .map(|(m, _)| *m);
        if let Some(current) = current {
            self.unassign(monitor);
            changed.push(current);
        }
        if let Some(other) = other.and_then(|id| self.monitor(id).copied()) {
            self.unassign(other.id);
            if let Some(current) = current {
                self.assign(other, current);
            }
        }
        self.assign(target, workspace);
        self.suppress_prune = false;
        changed
    }

    /// Positions for the workspace switch preview on `monitor`: the tilings
    /// stacked in most recently used order, each `offset` pixels further down.
    #[must_use]
    pub fn switch_preview(&self, monitor: MonitorId, offset: i32) -> Vec<(WorkspaceId, Xyhw)> {
        let Some(monitor) = self.monitor(monitor) else {
            return vec![];
        };
        let mut order: Vec<WorkspaceId> = self.workspace_on(monitor.id).into_iter().collect();
        order.extend(self.mru().filter(|ws| Some(*ws) != self.workspace_on(monitor.id)));
        order
            .into_iter()
            .filter(|ws| *ws < self.workspace_count)
            .enumerate()
            .map(|(depth, ws)| (ws, monitor.bbox.translate(0, offset * depth as i32)))
            .collect()
    }
}
