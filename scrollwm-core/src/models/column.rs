use super::{Handle, WindowHandle};
use serde::{Deserialize, Serialize};

/// Windows sharing a horizontal slot of a tiling, top to bottom.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Column<H: Handle> {
    #[serde(bound = "")]
    pub windows: Vec<WindowHandle<H>>,
    /// Left edge in scroll space, as of the last layout pass.
    pub x: i32,
    /// Width the column converged to during the last layout pass.
    pub width: i32,
    /// Set when the last layout pass ran out of retries for this column.
    pub unsettled: bool,
}

impl<H: Handle> Column<H> {
    #[must_use]
    pub fn new(handle: WindowHandle<H>) -> Self {
        Self {
            windows: vec![handle],
            x: 0,
            width: 0,
            unsettled: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    #[must_use]
    pub fn contains(&self, handle: &WindowHandle<H>) -> bool {
        self.windows.contains(handle)
    }

    #[must_use]
    pub fn row_of(&self, handle: &WindowHandle<H>) -> Option<usize> {
        self.windows.iter().position(|w| w == handle)
    }

    #[must_use]
    pub fn top(&self) -> Option<WindowHandle<H>> {
        self.windows.first().copied()
    }

    #[must_use]
    pub fn bottom(&self) -> Option<WindowHandle<H>> {
        self.windows.last().copied()
    }

    /// Insert at `row`, clamped to the end of the column.
    pub fn insert(&mut self, row: usize, handle: WindowHandle<H>) {
        let row = row.min(self.windows.len());
        self.windows.insert(row, handle);
    }

    pub fn remove(&mut self, handle: &WindowHandle<H>) -> Option<usize> {
        let row = self.row_of(handle)?;
        self.windows.remove(row);
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockHandle;

    #[test]
    fn insert_past_the_end_appends() {
        let mut column = Column::<MockHandle>::new(WindowHandle(1));
        column.insert(10, WindowHandle(2));
        assert_eq!(column.windows, vec![WindowHandle(1), WindowHandle(2)]);
        assert_eq!(column.bottom(), Some(WindowHandle(2)));
    }

    #[test]
    fn removing_reports_the_old_row() {
        let mut column = Column::<MockHandle>::new(WindowHandle(1));
        column.insert(0, WindowHandle(2));
        assert_eq!(column.remove(&WindowHandle(1)), Some(1));
        assert_eq!(column.remove(&WindowHandle(1)), None);
        assert_eq!(column.top(), Some(WindowHandle(2)));
    }
}
