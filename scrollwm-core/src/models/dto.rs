//! Serializable views of the model, for tools that watch or replay it.
use crate::errors::Result;
use crate::models::{Handle, MonitorId, TilingId, WindowHandle, Xyhw};
use crate::state::State;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WindowGeometry<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    /// Position in the tiling's scroll space.
    pub scroll: Xyhw,
    /// What the host last reported.
    pub frame: Xyhw,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColumnState<H: Handle> {
    pub x: i32,
    pub width: i32,
    pub unsettled: bool,
    #[serde(bound = "")]
    pub windows: Vec<WindowGeometry<H>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TilingState<H: Handle> {
    pub workspace: TilingId,
    pub monitor: Option<MonitorId>,
    pub target_x: i32,
    pub content_width: i32,
    #[serde(bound = "")]
    pub selected: Option<WindowHandle<H>>,
    #[serde(bound = "")]
    pub columns: Vec<ColumnState<H>>,
}

impl<H: Handle> TilingState<H> {
    /// Snapshot of one tiling. Fails when the tiling or one of its windows
    /// is unknown.
    pub fn new(state: &State<H>, id: TilingId) -> Result<Self> {
        let tiling = state.tiling(id)?;
        let mut columns = Vec::with_capacity(tiling.len());
        for column in &tiling.columns {
            let mut windows = Vec::with_capacity(column.len());
            for handle in &column.windows {
                let window = state.window(handle)?;
                windows.push(WindowGeometry {
                    handle: *handle,
                    scroll: Xyhw::new(
                        window.scroll.0,
                        window.scroll.1,
                        window.width(),
                        window.height(),
                    ),
                    frame: window.frame,
                });
            }
            columns.push(ColumnState {
                x: column.x,
                width: column.width,
                unsettled: column.unsettled,
                windows,
            });
        }
        Ok(Self {
            workspace: tiling.workspace,
            monitor: tiling.monitor(),
            target_x: tiling.target_x(),
            content_width: tiling.content_width,
            selected: tiling.selected(),
            columns,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ManagerState<H: Handle> {
    pub focused_tiling: Option<TilingId>,
    /// Workspaces, most recently shown first.
    pub mru: Vec<TilingId>,
    #[serde(bound = "")]
    pub tilings: Vec<TilingState<H>>,
}

impl<H: Handle> ManagerState<H> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<H: Handle> From<&State<H>> for ManagerState<H> {
    fn from(state: &State<H>) -> Self {
        let tilings = state
            .registry
            .tilings()
            .filter_map(|t| match TilingState::new(state, t.workspace) {
                Ok(snapshot) => Some(snapshot),
                Err(err) => {
                    tracing::debug!("Leaving tiling {} out of the snapshot: {}", t.workspace, err);
                    None
                }
            })
            .collect();
        Self {
            focused_tiling: state.focused_tiling,
            mru: state.registry.mru().collect(),
            tilings,
        }
    }
}
