//! Column based layout of a tiling.
//!
//! [`compute`] is pure: it works out where every window of a tiling goes in
//! scroll space without talking to the host. Getting the host to agree is
//! the job of the layout handler.
mod equal;
mod proportional;
mod weighted;

use crate::config::Settings;
use crate::errors::LayoutWarning;
use crate::models::{Handle, Tiling, Window, WindowHandle, Xyhw};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// How a column's height is shared between its windows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub enum Allocator {
    /// The selected window keeps its height, the others share the rest in
    /// proportion to their current heights.
    #[default]
    Proportional,
    Equal,
    Weighted(Vec<f64>),
}

#[derive(Debug, Error)]
#[error("Could not parse allocator: {0}")]
pub struct ParseAllocatorError(String);

impl std::str::FromStr for Allocator {
    type Err = ParseAllocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Proportional" => Ok(Self::Proportional),
            "Equal" => Ok(Self::Equal),
            _ => Err(ParseAllocatorError(s.to_owned())),
        }
    }
}

impl Allocator {
    /// Heights for windows whose current heights are `current`.
    pub fn allocate(
        &self,
        available: i32,
        gap: i32,
        current: &[i32],
        selected: Option<usize>,
        min_height: i32,
    ) -> Vec<i32> {
        match self {
            Self::Proportional => {
                proportional::allocate(available, gap, current, selected, min_height)
            }
            Self::Equal => equal::allocate(available, gap, current.len()),
            Self::Weighted(weights) => weighted::allocate(available, gap, current.len(), weights),
        }
    }
}

/// Which sizes a plan starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sizing {
    /// Sizes asked for by commands or earlier passes.
    #[default]
    Requested,
    /// What the host actually applied, used when it did not honour a request.
    Actual,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    pub allocator: Allocator,
    /// Allocators for single columns, by column index.
    pub overrides: HashMap<usize, Allocator>,
}

impl LayoutOptions {
    #[must_use]
    pub fn with_override(mut self, column: usize, allocator: Allocator) -> Self {
        self.overrides.insert(column, allocator);
        self
    }

    #[must_use]
    pub fn allocator_for(&self, column: usize) -> &Allocator {
        self.overrides.get(&column).unwrap_or(&self.allocator)
    }
}

/// A window and its rectangle in scroll space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedWindow<H: Handle> {
    pub handle: WindowHandle<H>,
    pub rect: Xyhw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan<H: Handle> {
    pub x: i32,
    pub width: i32,
    pub windows: Vec<PlacedWindow<H>>,
}

/// Result of [`compute`], one entry per column of the tiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan<H: Handle> {
    pub columns: Vec<ColumnPlan<H>>,
    pub content_width: i32,
}

impl<H: Handle> LayoutPlan<H> {
    pub fn placements(&self) -> impl Iterator<Item = &PlacedWindow<H>> {
        self.columns.iter().flat_map(|c| c.windows.iter())
    }
}

/// What a layout pass ended up doing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutReport<H: Handle> {
    /// Final rectangles in scroll space.
    pub geometries: Vec<PlacedWindow<H>>,
    pub content_width: i32,
    /// Column recomputations caused by the host not honouring a size.
    pub retries: usize,
    pub warnings: Vec<LayoutWarning<H>>,
    /// The pass was dropped because another one was running.
    pub skipped: bool,
}

/// Everything about the surroundings a column needs to be planned.
pub struct ColumnContext<'a, H: Handle> {
    pub windows: &'a HashMap<WindowHandle<H>, Window<H>>,
    pub area: Xyhw,
    pub selected: Option<WindowHandle<H>>,
    pub settings: &'a Settings,
}

/// Lay out every column of `tiling` left to right inside `area`.
///
/// Handles missing from `windows` are skipped. A column left without windows
/// gets an empty plan and takes no space.
pub fn compute<H: Handle>(
    tiling: &Tiling<H>,
    windows: &HashMap<WindowHandle<H>, Window<H>>,
    area: Xyhw,
    settings: &Settings,
    options: &LayoutOptions,
) -> LayoutPlan<H> {
    let context = ColumnContext {
        windows,
        area,
        selected: tiling.selected(),
        settings,
    };
    let mut x = 0;
    let mut columns = Vec::with_capacity(tiling.len());
    for (index, column) in tiling.columns.iter().enumerate() {
        let plan = plan_column(
            &column.windows,
            x,
            &context,
            options.allocator_for(index),
            Sizing::Requested,
        );
        if !plan.windows.is_empty() {
            x += plan.width + settings.gap;
        }
        columns.push(plan);
    }
    LayoutPlan {
        columns,
        content_width: (x - settings.gap).max(0),
    }
}

/// Lay out a single column whose left edge is at `x`.
pub fn plan_column<H: Handle>(
    handles: &[WindowHandle<H>],
    x: i32,
    context: &ColumnContext<'_, H>,
    allocator: &Allocator,
    sizing: Sizing,
) -> ColumnPlan<H> {
    let members: Vec<&Window<H>> = handles
        .iter()
        .filter_map(|h| context.windows.get(h))
        .collect();
    let width_of = |w: &Window<H>| match sizing {
        Sizing::Requested => w.current_width(),
        Sizing::Actual => w.width(),
    };
    let height_of = |w: &Window<H>| match sizing {
        Sizing::Requested => w.current_height(),
        Sizing::Actual => w.height(),
    };

    let selected = members
        .iter()
        .position(|w| Some(w.handle) == context.selected);
    let natural = match selected {
        Some(index) => width_of(members[index]),
        None => members.iter().map(|w| width_of(w)).max().unwrap_or_default(),
    };
    let max_width = (context.area.w() - 2 * context.settings.minimum_margin).max(1);
    let width = natural.clamp(1, max_width);

    let current: Vec<i32> = members.iter().map(|w| height_of(w)).collect();
    let heights = allocator.allocate(
        context.area.h(),
        context.settings.gap,
        &current,
        selected,
        context.settings.min_window_height,
    );

    let mut y = context.area.y();
    let windows = members
        .iter()
        .zip(heights)
        .map(|(w, h)| {
            let rect = Xyhw::new(x, y, width, h);
            y += h + context.settings.gap;
            PlacedWindow {
                handle: w.handle,
                rect,
            }
        })
        .collect();
    ColumnPlan { x, width, windows }
}
