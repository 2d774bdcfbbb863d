use serde::{Deserialize, Serialize};

/// Where a newly created window lands in its tiling.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InsertBehavior {
    /// A new column left of everything.
    First,
    /// A new column right of everything.
    Last,
    /// A new column left of the selected one.
    BeforeCurrent,
    /// A new column right of the selected one.
    #[default]
    AfterCurrent,
}
