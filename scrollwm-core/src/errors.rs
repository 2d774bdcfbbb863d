use crate::models::{Handle, TilingId, WindowHandle};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown window: {0}")]
    UnknownWindow(String),
    #[error("Unknown tiling: {0}")]
    UnknownTiling(TilingId),
    #[error("Parsing error: {0}")]
    SerdeParse(#[from] serde_json::error::Error),
}

impl CoreError {
    pub fn unknown_window<H: Handle>(handle: &WindowHandle<H>) -> Self {
        Self::UnknownWindow(format!("{:?}", handle.0))
    }
}

/// Things a layout pass had to give up on. The pass still finishes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutWarning<H: Handle> {
    #[error("Column {column} of tiling {tiling} did not settle after {retries} retries")]
    NonConvergent {
        tiling: TilingId,
        column: usize,
        retries: usize,
    },
    #[error("The host refused to resize {0:?}")]
    ResizeRefused(WindowHandle<H>),
}
