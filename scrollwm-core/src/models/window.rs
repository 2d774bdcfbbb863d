//! Window Information
#![allow(clippy::module_name_repetitions)]

use std::fmt::Debug;
use std::hash::Hash;

use super::WindowState;
use crate::models::WorkspaceId;
use crate::models::Xyhw;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A trait which backend specific window handles need to implement
pub trait Handle:
    Serialize + DeserializeOwned + Debug + Clone + Copy + PartialEq + Eq + Hash + Default + 'static
{
}

/// A Backend-agnostic handle to a window used to identify it
///
/// # Serde
///
/// Using generics here with serde derive macros causes some wierd behaviour with the compiler, so
/// as suggested by [this `serde` issue][serde-issue], just adding `#[serde(bound = "")]`
/// everywhere the generic is declared fixes the bug.
///
/// [serde-issue]: https://github.com/serde-rs/serde/issues/1296
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle<H>(#[serde(bound = "")] pub H)
where
    H: Handle;

/// Handle for testing purposes
pub type MockHandle = i32;
impl Handle for MockHandle {}
impl Handle for u32 {}
impl Handle for u64 {}

/// How a window takes part in the tiling.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Owned by exactly one column of its workspace's tiling.
    #[default]
    Tiled,
    /// Known, but positioned by the host. Never part of a column.
    Floating,
    /// Temporarily out of every column, eg. while being dragged.
    Detached,
}

/// Store Window information.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Window<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    pub placement: Placement,
    pub workspace: WorkspaceId,
    /// Stable identity used to match the persisted ordering on reload.
    pub fingerprint: Option<String>,
    pub states: Vec<WindowState>,
    pub can_resize: bool,
    /// Last frame reported by the host, in screen coordinates.
    pub frame: Xyhw,
    /// Size last requested from the host.
    pub target: Option<(i32, i32)>,
    /// Width asked for by a command, applied by the next layout pass.
    pub desired_width: Option<i32>,
    /// Height asked for by a command, applied by the next layout pass.
    pub desired_height: Option<i32>,
    /// Position inside the tiling's scroll space.
    pub scroll: (i32, i32),
    /// Position last sent for the visual proxy, in scroll space.
    pub proxy: Option<(i32, i32)>,
    /// Width to restore when horizontal maximization is toggled off.
    pub unmaximized_width: Option<i32>,
    /// Stacking serial, bigger is more recently raised.
    pub raised: u64,
}

impl<H: Handle> Window<H> {
    #[must_use]
    pub fn new(h: WindowHandle<H>, workspace: WorkspaceId, frame: Xyhw) -> Self {
        Self {
            handle: h,
            placement: Placement::Tiled,
            workspace,
            fingerprint: None,
            states: vec![],
            can_resize: true,
            frame,
            target: None,
            desired_width: None,
            desired_height: None,
            scroll: (0, 0),
            proxy: None,
            unmaximized_width: None,
            raised: 0,
        }
    }

    #[must_use]
    pub fn is_tiled(&self) -> bool {
        self.placement == Placement::Tiled
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.has_state(WindowState::Fullscreen)
    }

    #[must_use]
    pub fn is_maximized(&self) -> bool {
        self.has_state(WindowState::Maximized)
    }

    #[must_use]
    pub fn has_state(&self, state: WindowState) -> bool {
        self.states.contains(&state)
    }

    pub fn set_state(&mut self, state: WindowState, value: bool) {
        self.states.retain(|s| *s != state);
        if value {
            self.states.push(state);
        }
    }

    /// Whether the layout engine may ask the host to resize this window.
    #[must_use]
    pub fn resizable(&self) -> bool {
        self.can_resize && !self.is_fullscreen() && !self.is_maximized()
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.frame.w()
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.frame.h()
    }

    /// The width the layout should give this window.
    #[must_use]
    pub fn current_width(&self) -> i32 {
        self.desired_width.unwrap_or_else(|| self.frame.w())
    }

    /// The height the allocators should treat as this window's current height.
    #[must_use]
    pub fn current_height(&self) -> i32 {
        if let Some(h) = self.desired_height {
            return h;
        }
        match self.target {
            Some((_, h)) if h > 0 => h,
            _ => self.frame.h(),
        }
    }

    /// Whether the host already shows the window at `(w, h)`.
    #[must_use]
    pub fn reached(&self, w: i32, h: i32) -> bool {
        self.frame.w() == w && self.frame.h() == h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Window<MockHandle> {
        Window::new(WindowHandle(1), 0, Xyhw::new(0, 0, 400, 300))
    }

    #[test]
    fn a_new_window_is_tiled() {
        assert!(window().is_tiled());
    }

    #[test]
    fn fullscreen_windows_are_not_resizable() {
        let mut subject = window();
        assert!(subject.resizable());
        subject.set_state(WindowState::Fullscreen, true);
        assert!(subject.is_fullscreen());
        assert!(!subject.resizable());
        subject.set_state(WindowState::Fullscreen, false);
        assert!(subject.resizable());
    }

    #[test]
    fn setting_a_state_twice_keeps_a_single_entry() {
        let mut subject = window();
        subject.set_state(WindowState::MaximizedHorz, true);
        subject.set_state(WindowState::MaximizedHorz, true);
        assert_eq!(subject.states, vec![WindowState::MaximizedHorz]);
    }

    #[test]
    fn current_height_prefers_the_requested_height() {
        let mut subject = window();
        assert_eq!(subject.current_height(), 300);
        subject.target = Some((400, 500));
        assert_eq!(subject.current_height(), 500);
        subject.desired_height = Some(200);
        assert_eq!(subject.current_height(), 200);
    }

    #[test]
    fn current_width_prefers_the_desired_width() {
        let mut subject = window();
        assert_eq!(subject.current_width(), 400);
        subject.desired_width = Some(640);
        assert_eq!(subject.current_width(), 640);
    }
}
