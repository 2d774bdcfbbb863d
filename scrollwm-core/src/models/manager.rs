use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::Handle;
use crate::state::State;

/// Maintains current program state.
#[derive(Debug)]
pub struct Manager<H: Handle, C, SERVER> {
    pub state: State<H>,
    pub config: C,
    pub display_server: SERVER,
    /// Set while a layout pass runs, passes triggered meanwhile are dropped.
    pub(crate) layout_in_progress: bool,
}

impl<H, C, SERVER> Manager<H, C, SERVER>
where
    H: Handle,
    C: Config,
    SERVER: DisplayServer<H>,
{
    pub fn new(config: C) -> Self {
        let display_server = SERVER::new(&config);

        Self {
            state: State::new(&config),
            config,
            display_server,
            layout_in_progress: false,
        }
    }

    /// Handle everything the host has to say, then hand it the resulting
    /// actions. Returns true if anything needs to be rendered.
    pub fn process_events(&mut self) -> bool {
        let mut needs_update = false;
        loop {
            let events = self.display_server.get_next_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                needs_update = self.display_event_handler(event) || needs_update;
                self.flush_actions();
            }
        }
        self.display_server.flush();
        needs_update
    }

    /// Execute queued actions in order. Immediate replies from the host are
    /// handled as if they had arrived as events.
    pub fn flush_actions(&mut self) {
        while let Some(act) = self.state.actions.pop_front() {
            if let Some(reply) = self.display_server.execute_action(act) {
                self.display_event_handler(reply);
            }
        }
    }
}

#[cfg(test)]
impl
    Manager<
        crate::models::MockHandle,
        crate::config::tests::TestConfig,
        crate::display_servers::MockDisplayServer<crate::models::MockHandle>,
    >
{
    pub fn new_test() -> Self {
        Self::new(crate::config::tests::TestConfig::default())
    }

    /// A 1000x800 monitor showing workspace 0, with one column per width.
    /// Windows are numbered from 1 and the last one is selected.
    pub fn new_test_tiled(widths: &[i32]) -> Self {
        use crate::models::{Monitor, WindowHandle, Xyhw};
        let mut manager = Self::new_test();
        manager.monitors_changed_handler(vec![Monitor::new(0, Xyhw::new(0, 0, 1000, 800))]);
        for (i, w) in widths.iter().enumerate() {
            let handle = WindowHandle(i as crate::models::MockHandle + 1);
            let frame = Xyhw::new(0, 0, *w, 800);
            manager.display_server.frames.insert(handle, frame);
            manager.window_created_handler(handle, 0, frame, None, false);
        }
        manager
    }
}
