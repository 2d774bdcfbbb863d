//! Configuration, logging and tooling around the scrollwm core.
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
mod config;
pub mod replay;
pub mod utils;

pub use config::*;
