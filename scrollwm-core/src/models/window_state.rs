use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WindowState {
    /// Covers the whole monitor, ignores gaps and margins.
    Fullscreen,
    /// Maximized in both directions by the window itself. Not resizable by layout.
    Maximized,
    /// Width maximized to the work area by the `ToggleMaximize` command.
    MaximizedHorz,
}
