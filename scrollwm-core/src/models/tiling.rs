//! A workspace's columns plus the scroll state of the viewport looking at them.
use super::{Column, Handle, Monitor, MonitorId, WindowHandle, WorkspaceId, Xyhw};
use serde::{Deserialize, Serialize};

/// Location of a window inside a tiling.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

/// What `Tiling::remove_window` took out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removed {
    pub position: Position,
    /// The column became empty and was dropped.
    pub column_removed: bool,
}

/// Columns of one workspace and the viewport scrolling over them.
///
/// `selected` and `target_x` are only written by the viewport module so the
/// two never disagree.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Tiling<H: Handle> {
    pub workspace: WorkspaceId,
    monitor: Option<MonitorId>,
    #[serde(bound = "")]
    pub columns: Vec<Column<H>>,
    #[serde(bound = "")]
    selected: Option<WindowHandle<H>>,
    target_x: i32,
    /// Width of all columns and the gaps between them.
    pub content_width: i32,
    /// The container is being scrolled by a transition.
    pub animating: bool,
    /// Screen rectangle of the assigned monitor.
    screen: Xyhw,
    /// Monitor local area windows are laid out in.
    area: Xyhw,
}

impl<H: Handle> Tiling<H> {
    #[must_use]
    pub fn new(workspace: WorkspaceId) -> Self {
        Self {
            workspace,
            monitor: None,
            columns: vec![],
            selected: None,
            target_x: 0,
            content_width: 0,
            animating: false,
            screen: Xyhw::default(),
            area: Xyhw::default(),
        }
    }

    #[must_use]
    pub const fn monitor(&self) -> Option<MonitorId> {
        self.monitor
    }

    /// Unassigned tilings are not rendered and ignore layout requests.
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        self.monitor.is_none()
    }

    #[must_use]
    pub const fn selected(&self) -> Option<WindowHandle<H>> {
        self.selected
    }

    #[must_use]
    pub const fn target_x(&self) -> i32 {
        self.target_x
    }

    #[must_use]
    pub const fn screen(&self) -> Xyhw {
        self.screen
    }

    #[must_use]
    pub const fn area(&self) -> Xyhw {
        self.area
    }

    pub(crate) fn set_selected(&mut self, selected: Option<WindowHandle<H>>) {
        self.selected = selected;
    }

    pub(crate) fn set_target_x(&mut self, target_x: i32) {
        self.target_x = target_x;
    }

    pub(crate) fn assign(&mut self, monitor: &Monitor, area: Xyhw) {
        self.monitor = Some(monitor.id);
        self.screen = monitor.bbox;
        self.area = area;
    }

    pub(crate) fn detach(&mut self) {
        self.monitor = None;
        self.animating = false;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn windows(&self) -> impl Iterator<Item = &WindowHandle<H>> {
        self.columns.iter().flat_map(|c| c.windows.iter())
    }

    #[must_use]
    pub fn contains(&self, handle: &WindowHandle<H>) -> bool {
        self.columns.iter().any(|c| c.contains(handle))
    }

    #[must_use]
    pub fn position_of(&self, handle: &WindowHandle<H>) -> Option<Position> {
        self.columns.iter().enumerate().find_map(|(column, c)| {
            c.row_of(handle).map(|row| Position { column, row })
        })
    }

    #[must_use]
    pub fn column_of(&self, handle: &WindowHandle<H>) -> Option<usize> {
        self.position_of(handle).map(|p| p.column)
    }

    #[must_use]
    pub fn selected_position(&self) -> Option<Position> {
        self.position_of(&self.selected?)
    }

    /// Put `handle` in a column of its own at `index`, clamped to the end.
    pub fn insert_column(&mut self, index: usize, handle: WindowHandle<H>) -> usize {
        let index = index.min(self.columns.len());
        self.columns.insert(index, Column::new(handle));
        index
    }

    /// Put `handle` into an existing column, or a new trailing one when
    /// `column` is past the end.
    pub fn insert_row(&mut self, column: usize, row: usize, handle: WindowHandle<H>) -> Position {
        match self.columns.get_mut(column) {
            Some(c) => {
                c.insert(row, handle);
                let row = c.row_of(&handle).unwrap_or_default();
                Position { column, row }
            }
            None => Position {
                column: self.insert_column(column, handle),
                row: 0,
            },
        }
    }

    /// Take a window out of its column, dropping the column when it empties.
    pub fn remove_window(&mut self, handle: &WindowHandle<H>) -> Option<Removed> {
        let position = self.position_of(handle)?;
        self.columns[position.column].remove(handle);
        let column_removed = self.columns[position.column].is_empty();
        if column_removed {
            self.columns.remove(position.column);
        }
        Some(Removed {
            position,
            column_removed,
        })
    }

    /// The window that should take over the selection after `removed` left.
    #[must_use]
    pub fn neighbour_of(&self, removed: Removed) -> Option<WindowHandle<H>> {
        let Position { column, row } = removed.position;
        if !removed.column_removed {
            let c = self.columns.get(column)?;
            return c.windows.get(row).or_else(|| c.windows.last()).copied();
        }
        // Prefer the column that was on the left, the first column otherwise.
        self.columns.get(column.saturating_sub(1))?.top()
    }
}
