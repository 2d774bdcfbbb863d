//! Getting the host to agree with a layout plan.
use super::*;
use crate::errors::LayoutWarning;
use crate::layouts::{self, ColumnContext, ColumnPlan, LayoutOptions, LayoutReport, Sizing};
use crate::models::{Proxy, Tiling, TilingId, Xyhw};

/// How many times a column is recomputed from the sizes the host actually
/// applied before those sizes are accepted.
pub const MAX_RETRIES: usize = 5;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Lay out a tiling and push the result to the host.
    ///
    /// A pass requested while another one runs is dropped and reported as
    /// skipped. Detached tilings and areas without width are left alone.
    pub fn layout_tiling(&mut self, id: TilingId, options: &LayoutOptions) -> LayoutReport<H> {
        if self.layout_in_progress {
            tracing::trace!("Layout of tiling {} skipped, a pass is running", id);
            return LayoutReport {
                skipped: true,
                ..LayoutReport::default()
            };
        }
        let Some(tiling) = self.state.registry.tiling(id) else {
            return LayoutReport::default();
        };
        if tiling.is_detached() || tiling.area().w() <= 0 {
            return LayoutReport::default();
        }
        let view = self.valid_view(tiling.clone());

        self.layout_in_progress = true;
        let report = self.converge(&view, options);
        self.layout_in_progress = false;
        report
    }

    /// Lay out every tiling that is on a monitor.
    pub fn layout_all(&mut self) {
        let attached: Vec<TilingId> = self
            .state
            .registry
            .tilings()
            .filter(|t| !t.is_detached())
            .map(|t| t.workspace)
            .collect();
        for id in attached {
            self.layout_tiling(id, &LayoutOptions::default());
        }
    }

    /// A copy of the tiling without windows the host no longer knows, with
    /// frames refreshed from the host.
    fn valid_view(&mut self, mut view: Tiling<H>) -> Tiling<H> {
        for column in &mut view.columns {
            column.windows.retain(|handle| {
                let Some(window) = self.state.windows.get_mut(handle) else {
                    return false;
                };
                match self.display_server.window_frame(handle) {
                    Some(frame) => {
                        window.frame = frame;
                        true
                    }
                    None => {
                        tracing::debug!("Skipping {:?}, the host does not know it", handle);
                        false
                    }
                }
            });
        }
        view
    }

    fn converge(&mut self, view: &Tiling<H>, options: &LayoutOptions) -> LayoutReport<H> {
        let id = view.workspace;
        let area = view.area();
        let gap = self.state.settings.gap;
        let plan = layouts::compute(view, &self.state.windows, area, &self.state.settings, options);
        tracing::trace!("Laying out tiling {}: {} columns", id, plan.columns.len());
        for handle in view.windows() {
            if let Some(window) = self.state.windows.get_mut(handle) {
                window.desired_width = None;
                window.desired_height = None;
            }
        }

        let mut report = LayoutReport::default();
        let mut columns = plan.columns;
        for (index, column) in columns.iter_mut().enumerate() {
            let mut retries = 0;
            let unsettled = loop {
                if !self.apply_column(column, &mut report.warnings) {
                    break false;
                }
                if retries == MAX_RETRIES {
                    tracing::warn!(
                        "Column {} of tiling {} did not settle after {} retries, accepting the host's sizes",
                        index,
                        id,
                        retries
                    );
                    report.warnings.push(LayoutWarning::NonConvergent {
                        tiling: id,
                        column: index,
                        retries,
                    });
                    self.accept_actual(column, area.y(), gap);
                    break true;
                }
                retries += 1;
                report.retries += 1;
                let context = ColumnContext {
                    windows: &self.state.windows,
                    area,
                    selected: view.selected(),
                    settings: &self.state.settings,
                };
                *column = layouts::plan_column(
                    &view.columns[index].windows,
                    column.x,
                    &context,
                    options.allocator_for(index),
                    Sizing::Actual,
                );
            };
            if let Some(c) = self
                .state
                .registry
                .tiling_mut(id)
                .and_then(|t| t.columns.get_mut(index))
            {
                c.unsettled = unsettled;
            }
        }

        report.content_width = reflow(&mut columns, gap);
        report.geometries = columns.iter().flat_map(|c| c.windows.clone()).collect();
        self.commit(id, &columns, report.content_width);
        report
    }

    /// Request the sizes of a column plan. Returns true when the host
    /// applied something that is neither the request nor the previous size.
    fn apply_column(&mut self, column: &ColumnPlan<H>, warnings: &mut Vec<LayoutWarning<H>>) -> bool {
        let mut mismatched = false;
        for placed in &column.windows {
            let handle = placed.handle;
            let (w, h) = (placed.rect.w(), placed.rect.h());
            let Some(window) = self.state.windows.get_mut(&handle) else {
                continue;
            };
            if !window.resizable() {
                continue;
            }
            let has_new_target = window.target != Some((w, h));
            let previous = window.frame;
            window.target = Some((w, h));
            if !has_new_target || window.reached(w, h) {
                continue;
            }

            match self
                .display_server
                .execute_action(DisplayAction::RequestResize(handle, w, h))
            {
                Some(DisplayEvent::ResizeRefused(_)) => {
                    tracing::debug!("The host refused to resize {:?}", handle);
                    warnings.push(LayoutWarning::ResizeRefused(handle));
                    continue;
                }
                Some(DisplayEvent::WindowGeometryChanged(changed, frame)) if changed == handle => {
                    if let Some(window) = self.state.windows.get_mut(&handle) {
                        window.frame = frame;
                    }
                }
                Some(other) => {
                    self.display_event_handler(other);
                }
                None => {
                    if let (Some(frame), Some(window)) = (
                        self.display_server.window_frame(&handle),
                        self.state.windows.get_mut(&handle),
                    ) {
                        window.frame = frame;
                    }
                }
            }

            let Some(actual) = self.state.windows.get(&handle).map(|w| w.frame) else {
                continue;
            };
            if (actual.w(), actual.h()) != (w, h) && !actual.same_size(&previous) {
                tracing::trace!(
                    "{:?} asked for {}x{}, got {}x{}",
                    handle,
                    w,
                    h,
                    actual.w(),
                    actual.h()
                );
                mismatched = true;
            }
        }
        mismatched
    }

    /// Take the sizes the host applied as they are.
    fn accept_actual(&self, column: &mut ColumnPlan<H>, top: i32, gap: i32) {
        let mut y = top;
        let mut width = 0;
        for placed in &mut column.windows {
            let Some(frame) = self.state.windows.get(&placed.handle).map(|w| w.frame) else {
                continue;
            };
            placed.rect = Xyhw::new(column.x, y, frame.w(), frame.h());
            y += frame.h() + gap;
            width = width.max(frame.w());
        }
        column.width = width;
    }

    /// Store the final plan, move the proxies and scroll if needed.
    fn commit(&mut self, id: TilingId, columns: &[ColumnPlan<H>], content_width: i32) {
        let duration = self.state.settings.animation_duration;
        let Some(tiling) = self.state.registry.tiling_mut(id) else {
            return;
        };
        for (column, plan) in tiling.columns.iter_mut().zip(columns) {
            column.x = plan.x;
            column.width = plan.width;
        }
        let old_width = tiling.content_width;
        tiling.content_width = content_width;

        for placed in columns.iter().flat_map(|c| c.windows.iter()) {
            let Some(window) = self.state.windows.get_mut(&placed.handle) else {
                continue;
            };
            let position = (placed.rect.x(), placed.rect.y());
            window.scroll = position;
            if window.proxy == Some(position) {
                continue;
            }
            let animated = window.proxy.is_some();
            window.proxy = Some(position);
            let proxy = Proxy::Window(placed.handle);
            let transition = animated.then(|| self.state.transitions.start(proxy).0);
            self.state.actions.push_back(DisplayAction::SetVisualPosition {
                proxy,
                x: position.0,
                y: position.1,
                animated,
                duration_ms: duration,
                transition,
            });
        }

        self.state.auto_scroll(id, old_width);
        if self.state.registry.tiling(id).map_or(false, |t| !t.animating) {
            self.state.place_windows(id);
        }
    }
}

/// Lay the columns out left to right again after their widths settled.
/// Returns the content width.
fn reflow<H: Handle>(columns: &mut [ColumnPlan<H>], gap: i32) -> i32 {
    let mut x = 0;
    for column in columns.iter_mut() {
        let dx = x - column.x;
        column.x = x;
        for placed in &mut column.windows {
            placed.rect = placed.rect.translate(dx, 0);
        }
        if !column.windows.is_empty() {
            x += column.width + gap;
        }
    }
    (x - gap).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::TestConfig;
    use crate::display_servers::MockDisplayServer;
    use crate::models::{Monitor, MockHandle, WindowHandle, WindowState};

    type TestManager = Manager<MockHandle, TestConfig, MockDisplayServer<MockHandle>>;

    fn manager(monitor_width: i32) -> TestManager {
        let mut manager = Manager::new_test();
        manager.display_event_handler(DisplayEvent::MonitorsChanged(vec![Monitor::new(
            0,
            Xyhw::new(0, 0, monitor_width, 800),
        )]));
        manager
    }

    fn add(manager: &mut TestManager, handle: MockHandle, w: i32, h: i32) {
        let frame = Xyhw::new(0, 0, w, h);
        manager.display_server.frames.insert(WindowHandle(handle), frame);
        manager.display_event_handler(DisplayEvent::WindowCreate {
            handle: WindowHandle(handle),
            workspace: 0,
            frame,
            fingerprint: None,
            floating: false,
        });
    }

    #[test]
    fn a_second_pass_requests_nothing() {
        let mut manager = manager(1000);
        add(&mut manager, 1, 300, 400);
        add(&mut manager, 2, 400, 400);
        let first = manager.layout_tiling(0, &LayoutOptions::default());
        let requests = manager.display_server.resize_requests();
        let second = manager.layout_tiling(0, &LayoutOptions::default());
        assert_eq!(first.geometries, second.geometries);
        assert_eq!(manager.display_server.resize_requests(), requests);
    }

    #[test]
    fn windows_fill_the_column_height() {
        let mut manager = manager(1000);
        add(&mut manager, 1, 300, 400);
        let report = manager.layout_tiling(0, &LayoutOptions::default());
        assert_eq!(report.geometries[0].rect.h(), 800);
        assert_eq!(manager.display_server.frames[&WindowHandle(1)].h(), 800);
    }

    #[test]
    fn size_increments_converge_within_the_budget() {
        let mut manager = manager(1000);
        manager
            .display_server
            .increments
            .insert(WindowHandle(1), (10, 10));
        add(&mut manager, 1, 333, 400);
        let tiling = manager.state.registry.tiling(0).unwrap();
        assert!(!tiling.columns[0].unsettled);
        assert_eq!(tiling.columns[0].width, 330);
        let report = manager.layout_tiling(0, &LayoutOptions::default());
        assert!(report.warnings.is_empty());
        assert_eq!(report.retries, 0);
    }

    #[test]
    fn an_oscillating_host_is_accepted_after_five_retries() {
        let mut manager = manager(1000);
        add(&mut manager, 1, 300, 400);
        manager.display_server.oscillating.insert(WindowHandle(1));
        manager.display_server.executed.clear();
        if let Some(w) = manager.state.windows.get_mut(&WindowHandle(1)) {
            w.desired_width = Some(500);
        }
        let report = manager.layout_tiling(0, &LayoutOptions::default());
        assert_eq!(report.retries, MAX_RETRIES);
        assert_eq!(
            report.warnings,
            vec![LayoutWarning::NonConvergent {
                tiling: 0,
                column: 0,
                retries: MAX_RETRIES
            }]
        );
        assert_eq!(manager.display_server.resize_requests(), MAX_RETRIES + 1);
        assert!(manager.state.registry.tiling(0).unwrap().columns[0].unsettled);
    }

    #[test]
    fn a_refused_resize_is_not_retried() {
        let mut manager = manager(1000);
        manager.display_server.refusing.insert(WindowHandle(1));
        add(&mut manager, 1, 300, 400);
        manager.display_server.executed.clear();
        if let Some(w) = manager.state.windows.get_mut(&WindowHandle(1)) {
            w.desired_width = Some(450);
        }
        let report = manager.layout_tiling(0, &LayoutOptions::default());
        assert_eq!(report.warnings, vec![LayoutWarning::ResizeRefused(WindowHandle(1))]);
        assert_eq!(report.retries, 0);
        assert_eq!(manager.display_server.resize_requests(), 1);
        assert_eq!(manager.display_server.frames[&WindowHandle(1)].w(), 300);
    }

    #[test]
    fn windows_unknown_to_the_host_do_not_block_siblings() {
        let mut manager = manager(1000);
        add(&mut manager, 1, 300, 400);
        add(&mut manager, 2, 300, 400);
        manager.display_server.frames.remove(&WindowHandle(1));
        let report = manager.layout_tiling(0, &LayoutOptions::default());
        assert_eq!(report.geometries.len(), 1);
        assert_eq!(report.geometries[0].handle, WindowHandle(2));
        assert_eq!(report.geometries[0].rect.x(), 0);
    }

    #[test]
    fn a_running_pass_drops_new_ones() {
        let mut manager = manager(1000);
        add(&mut manager, 1, 300, 400);
        manager.layout_in_progress = true;
        assert!(manager.layout_tiling(0, &LayoutOptions::default()).skipped);
    }

    #[test]
    fn a_zero_width_area_is_a_no_op() {
        let mut manager = manager(0);
        add(&mut manager, 1, 300, 400);
        manager.display_server.executed.clear();
        let report = manager.layout_tiling(0, &LayoutOptions::default());
        assert!(report.geometries.is_empty());
        assert!(manager.display_server.executed.is_empty());
    }

    #[test]
    fn detached_tilings_are_not_laid_out() {
        let mut manager = manager(1000);
        manager.state.registry.ensure(2).unwrap().insert_column(0, WindowHandle(9));
        let report = manager.layout_tiling(2, &LayoutOptions::default());
        assert_eq!(report, LayoutReport::default());
    }

    #[test]
    fn fullscreen_windows_are_left_to_the_host() {
        let mut manager = manager(1000);
        add(&mut manager, 1, 300, 400);
        if let Some(w) = manager.state.windows.get_mut(&WindowHandle(1)) {
            w.set_state(WindowState::Fullscreen, true);
            w.desired_width = Some(700);
        }
        manager.display_server.executed.clear();
        manager.layout_tiling(0, &LayoutOptions::default());
        assert_eq!(manager.display_server.resize_requests(), 0);
    }

    #[test]
    fn proxies_follow_the_layout() {
        let mut manager = manager(1000);
        add(&mut manager, 1, 300, 400);
        add(&mut manager, 2, 400, 400);
        let window = &manager.state.windows[&WindowHandle(2)];
        assert_eq!(window.proxy, Some((310, 0)));
        assert_eq!(window.scroll, (310, 0));
    }
}
