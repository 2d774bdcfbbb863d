use super::*;
use crate::command::Direction;
use crate::layouts::{Allocator, LayoutOptions};
use crate::models::{Position, TilingId, WindowHandle};

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Select the neighbour of the selected window. Does not wrap.
    pub fn switch(&mut self, direction: Direction) -> bool {
        let Some(id) = self.state.focused_tiling else {
            return false;
        };
        let Some(tiling) = self.state.registry.tiling(id) else {
            return false;
        };
        let Some(Position { column, row }) = tiling.selected_position() else {
            return self.switch_to_column(id, 0);
        };
        if direction.is_horizontal() {
            let Some(target) = offset(column, direction.step(), tiling.len()) else {
                return false;
            };
            return self.switch_to_column(id, target);
        }
        let Some(target) = tiling
            .columns
            .get(column)
            .and_then(|c| Some(c.windows[offset(row, direction.step(), c.len())?]))
        else {
            return false;
        };
        self.state.ensure_viewport(id, &target, false)
    }

    pub fn switch_first(&mut self) -> bool {
        let Some(id) = self.state.focused_tiling else {
            return false;
        };
        self.switch_to_column(id, 0)
    }

    pub fn switch_last(&mut self) -> bool {
        let Some(id) = self.state.focused_tiling else {
            return false;
        };
        let Some(last) = self
            .state
            .registry
            .tiling(id)
            .and_then(|t| t.len().checked_sub(1))
        else {
            return false;
        };
        self.switch_to_column(id, last)
    }

    /// Select the window of a column that was raised last.
    fn switch_to_column(&mut self, id: TilingId, column: usize) -> bool {
        let Some(handles) = self
            .state
            .registry
            .tiling(id)
            .and_then(|t| t.columns.get(column))
            .map(|c| c.windows.clone())
        else {
            return false;
        };
        let Some(target) = self.state.most_recently_raised(&handles) else {
            return false;
        };
        if self.state.registry.tiling(id).and_then(|t| t.selected()) == Some(target) {
            return false;
        }
        self.state.ensure_viewport(id, &target, false)
    }

    /// Trade places with the neighbouring column, or the neighbouring row
    /// for vertical directions. The selection stays where it is.
    pub fn swap(&mut self, direction: Direction, handle: &WindowHandle<H>) -> bool {
        let Some(id) = self.state.tiling_of(handle) else {
            return false;
        };
        let Some(tiling) = self.state.registry.tiling_mut(id) else {
            return false;
        };
        let Some(Position { column, row }) = tiling.position_of(handle) else {
            return false;
        };
        if direction.is_horizontal() {
            let Some(other) = offset(column, direction.step(), tiling.len()) else {
                return false;
            };
            tiling.columns.swap(column, other);
        } else {
            let windows = &mut tiling.columns[column].windows;
            let Some(other) = offset(row, direction.step(), windows.len()) else {
                return false;
            };
            windows.swap(row, other);
        }
        tracing::debug!("Swapped {:?} {:?}", handle, direction);
        self.state.actions.push_back(DisplayAction::ColumnChanged(id));
        self.relayout_selected(id, LayoutOptions::default());
        true
    }

    /// Pull the top window of the column on the right into the bottom of the
    /// selected column.
    pub fn slurp(&mut self) -> bool {
        let Some((id, selected)) = self.state.selected() else {
            return false;
        };
        let Some(tiling) = self.state.registry.tiling_mut(id) else {
            return false;
        };
        let Some(column) = tiling.column_of(&selected) else {
            return false;
        };
        let Some(taken) = tiling.columns.get(column + 1).and_then(|c| c.top()) else {
            return false;
        };
        let Some(removed) = tiling.remove_window(&taken) else {
            return false;
        };
        let bottom = tiling.columns[column].len();
        tiling.insert_row(column, bottom, taken);

        let mut options = LayoutOptions::default().with_override(column, Allocator::Equal);
        if !removed.column_removed {
            options = options.with_override(column + 1, Allocator::Equal);
        }
        self.state.actions.push_back(DisplayAction::ColumnChanged(id));
        self.relayout_selected(id, options);
        true
    }

    /// Push the bottom window of the selected column out into a column of
    /// its own, right after.
    pub fn barf(&mut self) -> bool {
        let Some((id, selected)) = self.state.selected() else {
            return false;
        };
        let Some(tiling) = self.state.registry.tiling_mut(id) else {
            return false;
        };
        let Some(column) = tiling.column_of(&selected) else {
            return false;
        };
        let source = &mut tiling.columns[column];
        if source.len() < 2 {
            return false;
        }
        let Some(taken) = source.bottom() else {
            return false;
        };
        source.remove(&taken);
        tiling.insert_column(column + 1, taken);

        self.state.actions.push_back(DisplayAction::ColumnChanged(id));
        self.relayout_selected(
            id,
            LayoutOptions::default().with_override(column, Allocator::Equal),
        );
        true
    }

    /// Lay out a tiling whose order changed and bring the selection back
    /// into view.
    fn relayout_selected(&mut self, id: TilingId, options: LayoutOptions) {
        self.layout_tiling(id, &options);
        let selected = self.state.registry.tiling(id).and_then(|t| t.selected());
        if let Some(selected) = selected {
            self.state.ensure_viewport(id, &selected, true);
        }
    }
}

/// `index` moved by `step`, if that stays inside `0..len`.
fn offset(index: usize, step: i32, len: usize) -> Option<usize> {
    let target = index.checked_add_signed(step as isize)?;
    (target < len).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockHandle;

    type TestManager = crate::models::Manager<
        MockHandle,
        crate::config::tests::TestConfig,
        crate::display_servers::MockDisplayServer<MockHandle>,
    >;

    fn order(manager: &TestManager) -> Vec<Vec<MockHandle>> {
        manager
            .state
            .registry
            .tiling(0)
            .unwrap()
            .columns
            .iter()
            .map(|c| c.windows.iter().map(|h| h.0).collect())
            .collect()
    }

    fn selected(manager: &TestManager) -> Option<MockHandle> {
        manager.state.selected().map(|(_, h)| h.0)
    }

    #[test]
    fn switching_does_not_wrap() {
        let mut manager = TestManager::new_test_tiled(&[300, 300, 300]);
        assert_eq!(selected(&manager), Some(3));
        assert!(!manager.switch(Direction::Right));
        assert!(manager.switch(Direction::Left));
        assert_eq!(selected(&manager), Some(2));
        assert!(manager.switch_first());
        assert_eq!(selected(&manager), Some(1));
        assert!(!manager.switch(Direction::Left));
        assert!(!manager.switch(Direction::Up));
        assert!(manager.switch_last());
        assert_eq!(selected(&manager), Some(3));
    }

    #[test]
    fn horizontal_switches_pick_the_last_raised_window() {
        let mut manager = TestManager::new_test_tiled(&[300, 300, 300]);
        manager.state.ensure_viewport(0, &WindowHandle(1), false);
        assert!(manager.slurp());
        assert_eq!(order(&manager), vec![vec![1, 2], vec![3]]);
        assert!(manager.switch(Direction::Down));
        assert_eq!(selected(&manager), Some(2));
        assert!(manager.switch(Direction::Right));
        assert!(manager.switch(Direction::Left));
        assert_eq!(selected(&manager), Some(2));
    }

    #[test]
    fn swapping_back_restores_the_order() {
        let mut manager = TestManager::new_test_tiled(&[300, 400, 500]);
        assert!(manager.swap(Direction::Right, &WindowHandle(1)));
        assert_eq!(order(&manager), vec![vec![2], vec![1], vec![3]]);
        assert!(manager.swap(Direction::Left, &WindowHandle(1)));
        assert_eq!(order(&manager), vec![vec![1], vec![2], vec![3]]);
        assert_eq!(selected(&manager), Some(3));
        assert!(!manager.swap(Direction::Left, &WindowHandle(1)));
    }

    #[test]
    fn swapping_columns_moves_them_in_scroll_space() {
        let mut manager = TestManager::new_test_tiled(&[300, 400, 500]);
        manager.swap(Direction::Right, &WindowHandle(1));
        let tiling = manager.state.registry.tiling(0).unwrap();
        assert_eq!(tiling.columns[0].x, 0);
        assert_eq!(tiling.columns[1].x, 410);
        assert_eq!(manager.state.windows[&WindowHandle(1)].scroll.0, 410);
    }

    #[test]
    fn vertical_swaps_stay_inside_the_column() {
        let mut manager = TestManager::new_test_tiled(&[300, 300]);
        manager.state.ensure_viewport(0, &WindowHandle(1), false);
        manager.slurp();
        assert!(manager.swap(Direction::Down, &WindowHandle(1)));
        assert_eq!(order(&manager), vec![vec![2, 1]]);
        assert!(!manager.swap(Direction::Down, &WindowHandle(1)));
    }

    #[test]
    fn barf_undoes_slurp() {
        let mut manager = TestManager::new_test_tiled(&[300, 300, 300]);
        manager.state.ensure_viewport(0, &WindowHandle(1), false);
        assert!(manager.slurp());
        assert!(manager.barf());
        assert_eq!(order(&manager), vec![vec![1], vec![2], vec![3]]);
        assert_eq!(selected(&manager), Some(1));
        assert!(!manager.barf());
    }

    #[test]
    fn slurped_columns_share_the_height_equally() {
        let mut manager = TestManager::new_test_tiled(&[300, 300]);
        manager.state.ensure_viewport(0, &WindowHandle(1), false);
        manager.slurp();
        assert_eq!(manager.state.windows[&WindowHandle(1)].frame.h(), 395);
        assert_eq!(manager.state.windows[&WindowHandle(2)].frame.h(), 395);
    }

    #[test]
    fn slurp_evens_out_the_column_it_took_from() {
        let h = |manager: &TestManager, handle: MockHandle| {
            manager.state.windows[&WindowHandle(handle)].frame.h()
        };
        let mut manager = TestManager::new_test_tiled(&[300, 300, 300, 300]);
        manager.state.ensure_viewport(0, &WindowHandle(2), false);
        manager.slurp();
        manager.slurp();
        assert_eq!(order(&manager), vec![vec![1], vec![2, 3, 4]]);
        manager.state.ensure_viewport(0, &WindowHandle(4), false);
        manager.command_handler(&crate::command::Command::ResizeByDelta { dw: 0, dh: 200 });
        assert_eq!((h(&manager, 3), h(&manager, 4)), (160, 460));

        manager.state.ensure_viewport(0, &WindowHandle(1), false);
        assert!(manager.slurp());
        assert_eq!(order(&manager), vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(h(&manager, 3), 395);
        assert_eq!(h(&manager, 4), 395);
    }

    #[test]
    fn slurp_needs_a_column_on_the_right() {
        let mut manager = TestManager::new_test_tiled(&[300, 300]);
        assert!(!manager.slurp());
        assert_eq!(order(&manager), vec![vec![1], vec![2]]);
    }
}
