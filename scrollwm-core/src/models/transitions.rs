use super::{Handle, TilingId, WindowHandle};
use serde::{Deserialize, Serialize};

pub type TransitionId = u64;

/// Something the host draws on our behalf and that can be animated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Proxy<H: Handle> {
    /// The clone of a window inside its tiling's container.
    #[serde(bound = "")]
    Window(WindowHandle<H>),
    /// The container holding all of a tiling's window clones. Scrolling moves it.
    Container(TilingId),
    /// Placeholder shown while dragging over a drop zone.
    ZoneIndicator(u64),
}

/// Book keeping of in flight transitions, at most one per proxy.
///
/// Starting a transition on a proxy supersedes the running one. The host
/// reports completion with the id it was given, completions for superseded
/// ids are stale and ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Transitions<H: Handle> {
    next: TransitionId,
    #[serde(bound = "")]
    in_flight: Vec<(Proxy<H>, TransitionId)>,
}

impl<H: Handle> Transitions<H> {
    /// Start a transition, returning its id and the id it superseded.
    pub fn start(&mut self, proxy: Proxy<H>) -> (TransitionId, Option<TransitionId>) {
        self.next += 1;
        let id = self.next;
        let superseded = self.cancel(proxy);
        self.in_flight.push((proxy, id));
        (id, superseded)
    }

    /// Forget the running transition of `proxy`.
    pub fn cancel(&mut self, proxy: Proxy<H>) -> Option<TransitionId> {
        let index = self.in_flight.iter().position(|(p, _)| *p == proxy)?;
        Some(self.in_flight.remove(index).1)
    }

    /// Mark `id` as finished. Returns the proxy it animated, or `None` when
    /// the id is unknown or was superseded.
    pub fn complete(&mut self, id: TransitionId) -> Option<Proxy<H>> {
        let index = self.in_flight.iter().position(|(_, t)| *t == id)?;
        Some(self.in_flight.remove(index).0)
    }

    #[must_use]
    pub fn is_running(&self, proxy: Proxy<H>) -> bool {
        self.in_flight.iter().any(|(p, _)| *p == proxy)
    }
}
