//! A headless host that feeds scripted events to the model and applies its
//! requests on the spot.
//!
//! Scripts hold one JSON encoded [`DisplayEvent`] per line. Blank lines and
//! lines starting with `#` are skipped.

use scrollwm_core::models::{Handle, WindowHandle, WorkspaceId, Xyhw};
use scrollwm_core::{Config, DisplayAction, DisplayEvent, DisplayServer, Manager};
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

pub type ReplayHandle = u32;
pub type ReplayManager<C> = Manager<ReplayHandle, C, ReplayServer<ReplayHandle>>;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default)]
pub struct ReplayServer<H: Handle> {
    pub frames: HashMap<WindowHandle<H>, Xyhw>,
    pub persisted: HashMap<WorkspaceId, Vec<String>>,
    /// Every action the model asked for, in order.
    pub executed: Vec<DisplayAction<H>>,
    pending: VecDeque<DisplayEvent<H>>,
}

impl<H: Handle> ReplayServer<H> {
    pub fn queue(&mut self, events: impl IntoIterator<Item = DisplayEvent<H>>) {
        self.pending.extend(events);
    }

    /// Keep the host's view of window frames in step with what it reports.
    fn track(&mut self, event: &DisplayEvent<H>) {
        match event {
            DisplayEvent::WindowCreate { handle, frame, .. }
            | DisplayEvent::WindowGeometryChanged(handle, frame) => {
                self.frames.insert(*handle, *frame);
            }
            DisplayEvent::WindowDestroy(handle) => {
                self.frames.remove(handle);
            }
            _ => {}
        }
    }
}

impl<H: Handle> DisplayServer<H> for ReplayServer<H> {
    fn new(_: &impl Config) -> Self {
        Self::default()
    }

    /// One event at a time, so the actions of each are applied before the
    /// next one arrives.
    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>> {
        let Some(event) = self.pending.pop_front() else {
            return vec![];
        };
        self.track(&event);
        vec![event]
    }

    fn execute_action(&mut self, act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        self.executed.push(act.clone());
        match act {
            DisplayAction::RequestResize(handle, w, h) => {
                let frame = self.frames.get_mut(&handle)?;
                frame.set_w(w);
                frame.set_h(h);
                Some(DisplayEvent::WindowGeometryChanged(handle, *frame))
            }
            DisplayAction::RequestMove(handle, x, y) => {
                let frame = self.frames.get_mut(&handle)?;
                frame.set_x(x);
                frame.set_y(y);
                None
            }
            DisplayAction::SetVisualPosition {
                transition: Some(id),
                ..
            }
            | DisplayAction::SetVisualGeometry {
                transition: Some(id),
                ..
            } => Some(DisplayEvent::TransitionComplete(id)),
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

/// Parse a script.
///
/// # Errors
///
/// Errors with the line number of the first line that is not a valid event.
pub fn load_script<H: Handle>(script: &str) -> Result<Vec<DisplayEvent<H>>, ReplayError> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| ReplayError::Parse { line: i + 1, source })
        })
        .collect()
}

/// Play `events` against a fresh model.
pub fn run<C: Config>(config: C, events: Vec<DisplayEvent<ReplayHandle>>) -> ReplayManager<C> {
    let mut manager = ReplayManager::new(config);
    manager.display_server.queue(events);
    let rendered = manager.process_events();
    tracing::debug!(
        "Replay done, {} actions, needs render: {}",
        manager.display_server.executed.len(),
        rendered
    );
    manager
}
