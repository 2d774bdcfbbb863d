#[cfg(test)]
mod mock_display_server;

use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::models::{Handle, WindowHandle, WorkspaceId, Xyhw};
use crate::DisplayEvent;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

/// The host: whatever actually draws and sizes windows.
pub trait DisplayServer<H: Handle> {
    fn new(config: &impl Config) -> Self;

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>>;

    /// Carry out an action. A host that applies a resize right away replies
    /// with the resulting `WindowGeometryChanged`, or `ResizeRefused`.
    fn execute_action(&mut self, _act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        None
    }

    /// Current frame of a window, `None` when the handle is no longer valid.
    fn window_frame(&self, handle: &WindowHandle<H>) -> Option<Xyhw>;

    /// Window fingerprints of a workspace in their persisted column order.
    fn persisted_order(&self, _workspace: WorkspaceId) -> Option<Vec<String>> {
        None
    }

    fn flush(&self) {}
}
