use super::{MonitorId, Xyhw};
use serde::{Deserialize, Serialize};

/// A physical output as reported by the host.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monitor {
    pub id: MonitorId,
    /// Screen coordinates of the whole output.
    pub bbox: Xyhw,
    /// Area not covered by panels, relative to `bbox`. Defaults to the whole output.
    pub work_area: Option<Xyhw>,
}

impl Monitor {
    #[must_use]
    pub const fn new(id: MonitorId, bbox: Xyhw) -> Self {
        Self {
            id,
            bbox,
            work_area: None,
        }
    }

    /// The monitor local area windows are tiled in, after the vertical margins.
    #[must_use]
    pub fn tiling_area(&self, top: i32, bottom: i32) -> Xyhw {
        let local = self
            .work_area
            .unwrap_or_else(|| Xyhw::new(0, 0, self.bbox.w(), self.bbox.h()));
        local.inset(top, 0, bottom, 0)
    }

    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        self.bbox.contains_point(x, y)
    }
}
