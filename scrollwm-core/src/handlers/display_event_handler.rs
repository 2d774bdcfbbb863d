use super::*;
use crate::models::{Proxy, TransitionId};

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Process a single event from the host and apply its changes.
    /// Returns true if changes need to be rendered.
    pub fn display_event_handler(&mut self, event: DisplayEvent<H>) -> bool {
        match event {
            DisplayEvent::WindowCreate {
                handle,
                workspace,
                frame,
                fingerprint,
                floating,
            } => self.window_created_handler(handle, workspace, frame, fingerprint, floating),
            DisplayEvent::WindowDestroy(handle) => self.window_destroyed_handler(&handle),
            DisplayEvent::WindowGeometryChanged(handle, frame) => {
                self.window_geometry_changed_handler(&handle, frame)
            }
            DisplayEvent::WindowFocus(handle) => self.window_focus_handler(&handle),
            DisplayEvent::MonitorsChanged(monitors) => self.monitors_changed_handler(monitors),
            DisplayEvent::WorkspaceCountChanged(count) => {
                self.workspace_count_changed_handler(count)
            }
            DisplayEvent::ActiveWorkspaceChanged { monitor, workspace } => {
                self.active_workspace_changed_handler(monitor, workspace)
            }
            DisplayEvent::TransitionComplete(id) => self.transition_complete_handler(id),
            DisplayEvent::ResizeRefused(handle) => {
                // Outside a layout pass there is nothing to retry.
                tracing::debug!("The host refused to resize {:?}", handle);
                false
            }
            DisplayEvent::SendCommand(command) => self.command_handler(&command),
        }
    }

    fn transition_complete_handler(&mut self, id: TransitionId) -> bool {
        match self.state.transitions.complete(id) {
            Some(Proxy::Container(tiling)) => self.state.complete_scroll(tiling).is_some(),
            Some(Proxy::ZoneIndicator(indicator)) => {
                let before = self.state.dismissed_indicators.len();
                self.state.dismissed_indicators.retain(|i| *i != indicator);
                if self.state.dismissed_indicators.len() == before {
                    return false;
                }
                self.state
                    .actions
                    .push_back(DisplayAction::DestroyProxy(Proxy::ZoneIndicator(indicator)));
                true
            }
            Some(Proxy::Window(_)) => false,
            None => {
                tracing::trace!("Ignoring stale transition {}", id);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::TestConfig;
    use crate::display_servers::MockDisplayServer;
    use crate::models::{Monitor, MockHandle, WindowHandle, Xyhw};
    use crate::Manager;

    fn scroll_transition(
        manager: &Manager<MockHandle, TestConfig, MockDisplayServer<MockHandle>>,
    ) -> TransitionId {
        manager
            .state
            .actions
            .iter()
            .rev()
            .find_map(|a| match a {
                DisplayAction::SetVisualPosition {
                    proxy: Proxy::Container(0),
                    transition,
                    ..
                } => *transition,
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn stale_transitions_are_ignored() {
        let mut manager = Manager::new_test();
        manager.display_event_handler(DisplayEvent::MonitorsChanged(vec![Monitor::new(
            0,
            Xyhw::new(0, 0, 1000, 800),
        )]));
        for h in 1..=2 {
            manager.display_server.frames.insert(WindowHandle(h), Xyhw::new(0, 0, 300, 800));
            manager.display_event_handler(DisplayEvent::WindowCreate {
                handle: WindowHandle(h),
                workspace: 0,
                frame: Xyhw::new(0, 0, 300, 800),
                fingerprint: None,
                floating: false,
            });
        }
        let superseded = scroll_transition(&manager);
        manager.state.move_to(0, &WindowHandle(1), 400, false);
        let current = scroll_transition(&manager);
        assert_ne!(superseded, current);

        assert!(!manager.display_event_handler(DisplayEvent::TransitionComplete(superseded)));
        assert!(manager.state.registry.tiling(0).unwrap().animating);
        assert!(manager.display_event_handler(DisplayEvent::TransitionComplete(current)));
        assert!(!manager.state.registry.tiling(0).unwrap().animating);
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::MoveComplete(0))
        );
    }
}
