use crate::models::{Handle, Monitor, MonitorId, TransitionId, WindowHandle, WorkspaceId, Xyhw};
use crate::Command;
use serde::{Deserialize, Serialize};

/// What the host tells the model.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DisplayEvent<H: Handle> {
    /// A window appeared with this frame in screen coordinates.
    #[serde(bound = "")]
    WindowCreate {
        handle: WindowHandle<H>,
        workspace: WorkspaceId,
        frame: Xyhw,
        fingerprint: Option<String>,
        floating: bool,
    },
    #[serde(bound = "")]
    WindowDestroy(WindowHandle<H>),
    #[serde(bound = "")]
    WindowGeometryChanged(WindowHandle<H>, Xyhw),
    #[serde(bound = "")]
    WindowFocus(WindowHandle<H>),
    MonitorsChanged(Vec<Monitor>),
    WorkspaceCountChanged(usize),
    ActiveWorkspaceChanged {
        monitor: MonitorId,
        workspace: WorkspaceId,
    },
    TransitionComplete(TransitionId),
    /// The host will not resize this window at all.
    #[serde(bound = "")]
    ResizeRefused(WindowHandle<H>),
    #[serde(bound = "")]
    SendCommand(Command<H>),
}
