use crate::models::{TilingId, WindowHandle, Xyhw};
use crate::zones::DndZone;
use serde::{Deserialize, Serialize};

use super::window::Handle;

/// Where a dragged window came from, so an aborted drag can put it back.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragOrigin {
    pub tiling: TilingId,
    pub column: usize,
    pub row: usize,
    /// The window had a column of its own.
    pub alone: bool,
    pub rect: Xyhw,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DragState<H: Handle> {
    #[serde(bound = "")]
    pub window: WindowHandle<H>,
    pub origin: DragOrigin,
    pub zone: Option<DndZone>,
    /// Indicator currently showing `zone`.
    pub indicator: Option<u64>,
    /// No zone has been selected yet during this drag.
    pub initial: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub enum Mode<H: Handle> {
    #[serde(bound = "")]
    Dragging(DragState<H>),
    #[default]
    Normal,
}

impl<H: Handle> Mode<H> {
    #[must_use]
    pub const fn dragged(&self) -> Option<WindowHandle<H>> {
        match self {
            Self::Dragging(drag) => Some(drag.window),
            Self::Normal => None,
        }
    }
}
