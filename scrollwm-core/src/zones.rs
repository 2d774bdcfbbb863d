//! Classifying the pointer position during a drag into drop zones.
use crate::config::Settings;
use crate::models::{Handle, TilingId, Tiling, Window, WindowHandle, Xyhw};
use crate::viewport::{scroll_to_screen, screen_to_scroll};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What dropping inside a zone does.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneTarget {
    /// Create a new column at this index.
    Column(usize),
    /// Insert into an existing column at this row.
    Row { column: usize, row: usize },
}

/// The axis the pointer is tested along.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A drop target. Zones are equal when they insert at the same place, no
/// matter where the pointer was when they got selected.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct DndZone {
    pub tiling: TilingId,
    pub target: ZoneTarget,
    pub axis: Axis,
    /// Screen coordinate of the zone's center along `axis`.
    pub center: i32,
    /// Extent of the zone before and after `center` along `axis`.
    pub margins: (i32, i32),
    /// Start and length across `axis`, in screen coordinates.
    pub cross: (i32, i32),
}

impl PartialEq for DndZone {
    fn eq(&self, other: &Self) -> bool {
        self.tiling == other.tiling && self.target == other.target
    }
}

impl Eq for DndZone {}

impl DndZone {
    #[must_use]
    pub const fn column(&self) -> usize {
        match self.target {
            ZoneTarget::Column(column) | ZoneTarget::Row { column, .. } => column,
        }
    }

    /// Placeholder rectangle, `thickness` wide along the axis.
    #[must_use]
    pub fn indicator(&self, thickness: i32) -> Xyhw {
        let (start, length) = self.cross;
        let before = self.center - thickness / 2;
        match self.axis {
            Axis::Horizontal => Xyhw::new(before, start, thickness, length),
            Axis::Vertical => Xyhw::new(start, before, length, thickness),
        }
    }

    /// The indicator squashed to nothing at the zone's center.
    #[must_use]
    pub fn collapsed(&self) -> Xyhw {
        self.indicator(0)
    }
}

/// Find the zone under the screen point `(x, y)`.
///
/// Columns are tested first, with a band straddling the gap left of each
/// column plus a trailing slot after the last one. Only when the pointer is
/// strictly inside a column are its row boundaries tested.
pub fn select_dnd_zone<H: Handle>(
    tiling: &Tiling<H>,
    windows: &HashMap<WindowHandle<H>, Window<H>>,
    settings: &Settings,
    x: i32,
    y: i32,
) -> Option<DndZone> {
    let (sx, sy) = screen_to_scroll(tiling, x, y);
    let gap = settings.gap;
    let half_gap = gap / 2;
    let area = tiling.area();
    let screen_x = |x: i32| scroll_to_screen(tiling, x, 0).0;
    let column_zone = |column: usize, cx: i32, margin: i32| DndZone {
        tiling: tiling.workspace,
        target: ZoneTarget::Column(column),
        axis: Axis::Horizontal,
        center: screen_x(cx),
        margins: (margin, margin),
        cross: (tiling.screen().y() + area.y(), area.h()),
    };

    if tiling.is_empty() {
        let col_x = area.x() + area.w() / 2 - tiling.target_x() + half_gap;
        let cx = col_x - half_gap;
        let margin = area.w() / 4;
        return ((sx - cx).abs() <= margin).then(|| column_zone(0, cx, margin));
    }

    let margin = settings.column_zone_margin + half_gap;
    let mut slots: Vec<(i32, i32)> = tiling.columns.iter().map(|c| (c.x, c.width)).collect();
    if let Some(last) = tiling.columns.last() {
        slots.push((last.x + last.width + gap, 0));
    }

    for (index, (col_x, col_w)) in slots.into_iter().enumerate() {
        let cx = col_x - half_gap;
        if (sx - cx).abs() <= margin {
            return Some(column_zone(index, cx, margin));
        }
        if col_x + col_w < sx {
            continue;
        }
        if sx < col_x - gap - margin {
            return None;
        }
        if col_x < sx && sx < col_x + col_w {
            return select_row_zone(tiling, windows, settings, index, sy);
        }
    }
    None
}

fn select_row_zone<H: Handle>(
    tiling: &Tiling<H>,
    windows: &HashMap<WindowHandle<H>, Window<H>>,
    settings: &Settings,
    column: usize,
    sy: i32,
) -> Option<DndZone> {
    let gap = settings.gap;
    let half_gap = gap / 2;
    let margin = settings.row_zone_margin + half_gap;
    let col = tiling.columns.get(column)?;

    let mut rows: Vec<i32> = col
        .windows
        .iter()
        .filter_map(|h| windows.get(h))
        .map(|w| w.scroll.1)
        .collect();
    let last = col.windows.iter().rev().find_map(|h| windows.get(h))?;
    rows.push(last.scroll.1 + last.current_height() + gap);
    let count = rows.len();

    let (screen_x, screen_y) = scroll_to_screen(tiling, col.x, 0);
    rows.into_iter().enumerate().find_map(|(row, row_y)| {
        let cy = row_y - half_gap;
        let before = if row == 0 { 0 } else { margin };
        let after = if row + 1 == count { 0 } else { margin };
        (cy - before <= sy && sy <= cy + after).then(|| DndZone {
            tiling: tiling.workspace,
            target: ZoneTarget::Row { column, row },
            axis: Axis::Vertical,
            center: screen_y + cy,
            margins: (before, after),
            cross: (screen_x, col.width),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::TestConfig;
    use crate::models::{Column, Monitor, MockHandle};

    fn settings() -> Settings {
        Settings::new(&TestConfig::default())
    }

    /// A tiling with one single window column per width, laid out from x=0.
    fn setup(widths: &[i32], height: i32) -> (Tiling<MockHandle>, HashMap<WindowHandle<MockHandle>, Window<MockHandle>>) {
        let monitor = Monitor::new(0, Xyhw::new(0, 0, 1000, height));
        let mut tiling = Tiling::new(0);
        tiling.assign(&monitor, Xyhw::new(0, 0, 1000, height));
        let mut windows = HashMap::new();
        let mut x = 0;
        for (i, w) in widths.iter().enumerate() {
            let handle = WindowHandle(i as MockHandle + 1);
            let mut column = Column::new(handle);
            column.x = x;
            column.width = *w;
            tiling.columns.push(column);
            let mut window = Window::new(handle, 0, Xyhw::new(x, 0, *w, height));
            window.scroll = (x, 0);
            windows.insert(handle, window);
            x += w + 10;
        }
        (tiling, windows)
    }

    #[test]
    fn pointer_in_the_gap_selects_a_new_column() {
        let (tiling, windows) = setup(&[300, 390], 1000);
        let zone = select_dnd_zone(&tiling, &windows, &settings(), 305, 500).unwrap();
        assert_eq!(zone.target, ZoneTarget::Column(1));
        assert_eq!(zone.center, 305);
    }

    #[test]
    fn pointer_in_the_middle_of_a_single_window_selects_nothing() {
        let (tiling, windows) = setup(&[300, 390], 1000);
        assert_eq!(select_dnd_zone(&tiling, &windows, &settings(), 150, 500), None);
    }

    #[test]
    fn pointer_after_the_last_column_selects_the_trailing_slot() {
        let (tiling, windows) = setup(&[300, 390], 1000);
        let zone = select_dnd_zone(&tiling, &windows, &settings(), 760, 500).unwrap();
        assert_eq!(zone.target, ZoneTarget::Column(2));
    }

    #[test]
    fn row_boundaries_are_zones() {
        let (mut tiling, mut windows) = setup(&[600], 1000);
        let second = WindowHandle(9);
        tiling.columns[0].windows.push(second);
        if let Some(first) = windows.get_mut(&WindowHandle(1)) {
            first.frame = Xyhw::new(0, 0, 600, 495);
        }
        let mut window = Window::new(second, 0, Xyhw::new(0, 505, 600, 495));
        window.scroll = (0, 505);
        windows.insert(second, window);

        let zone = select_dnd_zone(&tiling, &windows, &settings(), 300, 480).unwrap();
        assert_eq!(zone.target, ZoneTarget::Row { column: 0, row: 1 });
        assert_eq!(zone.axis, Axis::Vertical);
        let zone = select_dnd_zone(&tiling, &windows, &settings(), 300, 10).unwrap();
        assert_eq!(zone.target, ZoneTarget::Row { column: 0, row: 0 });
        assert_eq!(zone.margins.0, 0);
    }

    #[test]
    fn an_empty_tiling_offers_a_column_around_the_center() {
        let (tiling, windows) = setup(&[], 1000);
        let zone = select_dnd_zone(&tiling, &windows, &settings(), 600, 500).unwrap();
        assert_eq!(zone.target, ZoneTarget::Column(0));
        assert_eq!(zone.margins, (250, 250));
        assert_eq!(select_dnd_zone(&tiling, &windows, &settings(), 100, 500), None);
    }

    #[test]
    fn zones_are_identified_by_their_insertion_point() {
        let (tiling, windows) = setup(&[300, 390], 1000);
        let a = select_dnd_zone(&tiling, &windows, &settings(), 300, 100).unwrap();
        let b = select_dnd_zone(&tiling, &windows, &settings(), 320, 900).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn the_indicator_collapses_along_the_axis() {
        let (tiling, windows) = setup(&[300, 390], 1000);
        let zone = select_dnd_zone(&tiling, &windows, &settings(), 305, 500).unwrap();
        assert_eq!(zone.indicator(10), Xyhw::new(300, 0, 10, 1000));
        assert_eq!(zone.collapsed(), Xyhw::new(305, 0, 0, 1000));
    }
}
