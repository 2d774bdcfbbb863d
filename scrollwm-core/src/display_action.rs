use crate::models::{Handle, Proxy, TilingId, TransitionId, WindowHandle, WindowState, Xyhw};
use crate::zones::DndZone;
use serde::{Deserialize, Serialize};

/// These are requests and notifications from the model.
/// The display server should act on these actions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DisplayAction<H: Handle> {
    /// Ask the host to give a window this size. The host may reply right
    /// away with the geometry it actually applied.
    #[serde(bound = "")]
    RequestResize(WindowHandle<H>, i32, i32),

    /// Move a window to a screen position.
    #[serde(bound = "")]
    RequestMove(WindowHandle<H>, i32, i32),

    /// Position a visual proxy. Window proxies are positioned in their
    /// tiling's scroll space, containers relative to their monitor.
    #[serde(bound = "")]
    SetVisualPosition {
        proxy: Proxy<H>,
        x: i32,
        y: i32,
        animated: bool,
        duration_ms: u32,
        transition: Option<TransitionId>,
    },

    /// Give a zone indicator a geometry in screen coordinates.
    #[serde(bound = "")]
    SetVisualGeometry {
        proxy: Proxy<H>,
        rect: Xyhw,
        animated: bool,
        duration_ms: u32,
        transition: Option<TransitionId>,
    },

    /// Stop the running transition of a proxy where it is.
    #[serde(bound = "")]
    CancelTransition(Proxy<H>),

    #[serde(bound = "")]
    DestroyProxy(Proxy<H>),

    /// Put a window on top of the stacking order.
    #[serde(bound = "")]
    RaiseWindow(WindowHandle<H>),

    /// Change a windows state.
    #[serde(bound = "")]
    SetState(WindowHandle<H>, bool, WindowState),

    #[serde(bound = "")]
    SelectionChanged(WindowHandle<H>),

    ZoneActivated(DndZone),

    ZoneDeactivated(DndZone),

    /// A tiling finished scrolling.
    MoveComplete(TilingId),

    /// Windows were added, removed or rearranged in a tiling.
    ColumnChanged(TilingId),
}
