use super::*;
use crate::config::InsertBehavior;
use crate::layouts::LayoutOptions;
use crate::models::{Mode, Placement, Proxy, Window, WindowHandle, WorkspaceId, Xyhw};

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Tile a new window next to the selection, as configured.
    /// Returns true if changes need to be rendered.
    pub fn window_created_handler(
        &mut self,
        handle: WindowHandle<H>,
        workspace: WorkspaceId,
        frame: Xyhw,
        fingerprint: Option<String>,
        floating: bool,
    ) -> bool {
        if self.state.windows.contains_key(&handle) {
            return false;
        }
        let count = self.state.registry.workspace_count();
        let mut window = Window::new(handle, workspace.min(count.saturating_sub(1)), frame);
        window.fingerprint = fingerprint;
        if floating || count == 0 {
            window.placement = Placement::Floating;
            self.state.windows.insert(handle, window);
            return false;
        }
        let workspace = window.workspace;
        self.state.windows.insert(handle, window);

        let behavior = self.state.settings.insert_behavior;
        let Some(tiling) = self.state.registry.ensure(workspace) else {
            return false;
        };
        let current = tiling.selected_position().map(|p| p.column);
        let index = match (behavior, current) {
            (InsertBehavior::First, _) => 0,
            (InsertBehavior::BeforeCurrent, Some(column)) => column,
            (InsertBehavior::AfterCurrent, Some(column)) => column + 1,
            _ => tiling.len(),
        };
        tiling.insert_column(index, handle);
        let had_selection = current.is_some();
        tracing::debug!("Tiling {:?} on workspace {} at column {}", handle, workspace, index);

        self.state
            .actions
            .push_back(DisplayAction::ColumnChanged(workspace));
        self.layout_tiling(workspace, &LayoutOptions::default());
        if self.state.settings.focus_new_windows || !had_selection {
            self.state.ensure_viewport(workspace, &handle, false);
        }
        true
    }

    /// Process a window destroyed event.
    /// Returns true if changes need to be rendered.
    pub fn window_destroyed_handler(&mut self, handle: &WindowHandle<H>) -> bool {
        if self.state.mode.dragged() == Some(*handle) {
            self.abort_drag();
        }
        let tiling = self.state.tiling_of(handle);
        if self.state.windows.remove(handle).is_none() {
            return false;
        }
        if self.state.transitions.cancel(Proxy::Window(*handle)).is_some() {
            self.state
                .actions
                .push_back(DisplayAction::CancelTransition(Proxy::Window(*handle)));
        }
        let Some(id) = tiling else {
            return false;
        };
        self.remove_from_tiling(id, handle);
        true
    }

    /// Take a window out of its tiling and fix the selection up.
    pub(crate) fn remove_from_tiling(&mut self, id: WorkspaceId, handle: &WindowHandle<H>) {
        let Some(tiling) = self.state.registry.tiling_mut(id) else {
            return;
        };
        let was_selected = tiling.selected() == Some(*handle);
        let Some(removed) = tiling.remove_window(handle) else {
            return;
        };
        let neighbour = tiling.neighbour_of(removed);

        self.state.actions.push_back(DisplayAction::ColumnChanged(id));
        self.layout_tiling(id, &LayoutOptions::default());
        if !was_selected {
            return;
        }
        match neighbour {
            Some(next) => {
                self.state.ensure_viewport(id, &next, false);
            }
            None => self.state.clear_selection(id),
        }
    }

    /// The host changed a window's frame.
    ///
    /// Sizes the model did not ask for come from the client itself and get
    /// adopted, the tiling is laid out again around them.
    pub fn window_geometry_changed_handler(&mut self, handle: &WindowHandle<H>, frame: Xyhw) -> bool {
        let Some(window) = self.state.windows.get_mut(handle) else {
            return false;
        };
        let resized = !window.frame.same_size(&frame);
        window.frame = frame;
        if !resized || !window.is_tiled() || self.layout_in_progress {
            return false;
        }
        if window.target == Some((frame.w(), frame.h())) {
            return false;
        }
        window.target = None;
        let Some(id) = self.state.tiling_of(handle) else {
            return false;
        };
        self.layout_tiling(id, &LayoutOptions::default());
        true
    }

    /// The host focused a window, select it.
    pub fn window_focus_handler(&mut self, handle: &WindowHandle<H>) -> bool {
        if matches!(self.state.mode, Mode::Dragging(_)) {
            return false;
        }
        let Some(id) = self.state.tiling_of(handle) else {
            return false;
        };
        if self.state.registry.tiling(id).and_then(|t| t.selected()) == Some(*handle) {
            return false;
        }
        self.state.ensure_viewport(id, handle, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::TestConfig;
    use crate::display_servers::MockDisplayServer;
    use crate::models::{Monitor, MockHandle};

    type TestManager = Manager<MockHandle, TestConfig, MockDisplayServer<MockHandle>>;

    fn manager(config: TestConfig) -> TestManager {
        let mut manager = Manager::new(config);
        manager.monitors_changed_handler(vec![Monitor::new(0, Xyhw::new(0, 0, 1000, 800))]);
        manager
    }

    fn add(manager: &mut TestManager, handle: MockHandle) {
        let frame = Xyhw::new(0, 0, 300, 800);
        manager.display_server.frames.insert(WindowHandle(handle), frame);
        manager.window_created_handler(WindowHandle(handle), 0, frame, None, false);
    }

    fn order(manager: &TestManager) -> Vec<MockHandle> {
        manager
            .state
            .registry
            .tiling(0)
            .unwrap()
            .windows()
            .map(|h| h.0)
            .collect()
    }

    #[test]
    fn new_windows_go_after_the_selected_one() {
        let mut manager = manager(TestConfig::default());
        add(&mut manager, 1);
        add(&mut manager, 2);
        manager.state.ensure_viewport(0, &WindowHandle(1), false);
        add(&mut manager, 3);
        assert_eq!(order(&manager), vec![1, 3, 2]);
        assert_eq!(manager.state.selected(), Some((0, WindowHandle(3))));
    }

    #[test]
    fn insert_behavior_first_puts_windows_in_front() {
        let mut manager = manager(TestConfig {
            insert_behavior: InsertBehavior::First,
            ..TestConfig::default()
        });
        add(&mut manager, 1);
        add(&mut manager, 2);
        assert_eq!(order(&manager), vec![2, 1]);
    }

    #[test]
    fn unfocused_new_windows_keep_the_selection() {
        let mut manager = manager(TestConfig {
            focus_new_windows: false,
            ..TestConfig::default()
        });
        add(&mut manager, 1);
        add(&mut manager, 2);
        assert_eq!(manager.state.selected(), Some((0, WindowHandle(1))));
    }

    #[test]
    fn floating_windows_are_not_tiled() {
        let mut manager = manager(TestConfig::default());
        let frame = Xyhw::new(10, 10, 200, 200);
        manager.window_created_handler(WindowHandle(7), 0, frame, None, true);
        assert!(manager.state.windows.contains_key(&WindowHandle(7)));
        assert_eq!(manager.state.tiling_of(&WindowHandle(7)), None);
    }

    #[test]
    fn destroying_the_selected_window_selects_a_neighbour() {
        let mut manager = manager(TestConfig::default());
        add(&mut manager, 1);
        add(&mut manager, 2);
        add(&mut manager, 3);
        manager.state.ensure_viewport(0, &WindowHandle(2), false);
        assert!(manager.window_destroyed_handler(&WindowHandle(2)));
        assert_eq!(order(&manager), vec![1, 3]);
        assert_eq!(manager.state.selected(), Some((0, WindowHandle(1))));
        assert!(!manager.window_destroyed_handler(&WindowHandle(2)));
    }

    #[test]
    fn destroying_the_last_window_clears_the_selection() {
        let mut manager = manager(TestConfig::default());
        add(&mut manager, 1);
        manager.window_destroyed_handler(&WindowHandle(1));
        assert_eq!(manager.state.selected(), None);
        assert!(manager.state.registry.tiling(0).unwrap().is_empty());
    }

    #[test]
    fn a_client_resizing_itself_triggers_a_layout() {
        let mut manager = manager(TestConfig::default());
        add(&mut manager, 1);
        add(&mut manager, 2);
        let grown = Xyhw::new(0, 0, 500, 800);
        manager.display_server.frames.insert(WindowHandle(1), grown);
        assert!(manager.window_geometry_changed_handler(&WindowHandle(1), grown));
        let tiling = manager.state.registry.tiling(0).unwrap();
        assert_eq!(tiling.columns[0].width, 500);
        assert_eq!(tiling.columns[1].x, 510);
    }

    #[test]
    fn moves_do_not_trigger_a_layout() {
        let mut manager = manager(TestConfig::default());
        add(&mut manager, 1);
        let moved = Xyhw::new(40, 0, 300, 800);
        assert!(!manager.window_geometry_changed_handler(&WindowHandle(1), moved));
        assert_eq!(manager.state.windows[&WindowHandle(1)].frame.x(), 40);
    }

    #[test]
    fn focusing_a_window_selects_it() {
        let mut manager = manager(TestConfig::default());
        add(&mut manager, 1);
        add(&mut manager, 2);
        assert!(manager.window_focus_handler(&WindowHandle(1)));
        assert_eq!(manager.state.selected(), Some((0, WindowHandle(1))));
        assert!(!manager.window_focus_handler(&WindowHandle(1)));
    }
}
