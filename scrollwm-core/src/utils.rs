//! Various utilities.
pub mod helpers;
