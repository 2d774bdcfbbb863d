use super::Config;
use super::DisplayAction;
use super::DisplayEvent;
use super::DisplayServer;
use crate::models::{Handle, WindowHandle, WorkspaceId, Xyhw};
use std::collections::{HashMap, HashSet};

/// A host that applies requests on the spot, with knobs for the ways real
/// clients misbehave.
#[derive(Clone, Debug, Default)]
pub struct MockDisplayServer<H: Handle> {
    pub frames: HashMap<WindowHandle<H>, Xyhw>,
    /// Sizes snap down to multiples of these, like terminals with a cell grid.
    pub increments: HashMap<WindowHandle<H>, (i32, i32)>,
    /// Never end up at the requested size, alternating above and below it.
    pub oscillating: HashSet<WindowHandle<H>>,
    pub refusing: HashSet<WindowHandle<H>>,
    pub persisted: HashMap<WorkspaceId, Vec<String>>,
    pub events: Vec<DisplayEvent<H>>,
    pub executed: Vec<DisplayAction<H>>,
    flip: bool,
}

impl<H: Handle> MockDisplayServer<H> {
    pub fn resize_requests(&self) -> usize {
        self.executed
            .iter()
            .filter(|a| matches!(a, DisplayAction::RequestResize(..)))
            .count()
    }

    fn resize(&mut self, handle: WindowHandle<H>, w: i32, h: i32) -> Option<DisplayEvent<H>> {
        if self.refusing.contains(&handle) {
            return Some(DisplayEvent::ResizeRefused(handle));
        }
        let (w, h) = if let Some((iw, ih)) = self.increments.get(&handle) {
            ((w - w % iw).max(*iw), (h - h % ih).max(*ih))
        } else if self.oscillating.contains(&handle) {
            self.flip = !self.flip;
            let d = if self.flip { 7 } else { -7 };
            (w + d, h + d)
        } else {
            (w, h)
        };
        let frame = self.frames.get_mut(&handle)?;
        frame.set_w(w);
        frame.set_h(h);
        Some(DisplayEvent::WindowGeometryChanged(handle, *frame))
    }
}

impl<H: Handle> DisplayServer<H> for MockDisplayServer<H> {
    fn new(_: &impl Config) -> Self {
        Self::default()
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>> {
        std::mem::take(&mut self.events)
    }

    fn execute_action(&mut self, act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        self.executed.push(act.clone());
        match act {
            DisplayAction::RequestResize(handle, w, h) => self.resize(handle, w, h),
            DisplayAction::RequestMove(handle, x, y) => {
                let frame = self.frames.get_mut(&handle)?;
                frame.set_x(x);
                frame.set_y(y);
                None
            }
            _ => None,
        }
    }

    fn window_frame(&self, handle: &WindowHandle<H>) -> Option<Xyhw> {
        self.frames.get(handle).copied()
    }

    fn persisted_order(&self, workspace: WorkspaceId) -> Option<Vec<String>> {
        self.persisted.get(&workspace).cloned()
    }
}
