//! The spatial model of a scrollable, column based tiling window manager.
// We deny clippy pedantic lints, primarily to keep code as correct as possible.
#![warn(clippy::pedantic)]
// Each of these lints are globally allowed because they otherwise make a lot
// of noise. However, work to ensure that each use of one of these is correct
// would be very much appreciated.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::default_trait_access,
    clippy::module_name_repetitions
)]
mod command;
pub mod config;
mod display_action;
mod display_event;
pub mod display_servers;
pub mod errors;
mod handlers;
pub mod layouts;
pub mod models;
pub mod state;
pub mod utils;
pub mod viewport;
pub mod zones;

pub use command::{Command, Direction, ParseDirectionError};
pub use config::{Config, InsertBehavior, Settings};
pub use display_action::DisplayAction;
pub use display_event::DisplayEvent;
pub use display_servers::DisplayServer;
pub use errors::{CoreError, LayoutWarning};
pub use handlers::layout_handler::MAX_RETRIES;
pub use layouts::{Allocator, LayoutOptions, LayoutReport};
pub use models::dto::ManagerState;
pub use models::Manager;
pub use models::Mode;
pub use models::Window;
pub use state::State;
pub use zones::DndZone;
