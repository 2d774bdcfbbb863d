//! Objects (such as windows and columns) the spatial model is built from.
mod column;
mod manager;
mod mode;
mod monitor;
mod registry;
mod tiling;
mod transitions;
mod window;
mod window_state;
mod xyhw;

pub mod dto;

pub use column::Column;
pub use manager::Manager;
pub use mode::{DragOrigin, DragState, Mode};
pub use monitor::Monitor;
pub use registry::Registry;
pub use tiling::{Position, Removed, Tiling};
pub use transitions::{Proxy, TransitionId, Transitions};
pub use window::Handle;
pub use window::MockHandle;
pub use window::Placement;
pub use window::Window;
pub use window::WindowHandle;
pub use window_state::WindowState;
pub use xyhw::Xyhw;
pub use xyhw::XyhwBuilder;

pub type WorkspaceId = usize;
pub type MonitorId = usize;
/// Tilings are keyed by the workspace they belong to.
pub type TilingId = WorkspaceId;
