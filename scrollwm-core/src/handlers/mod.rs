pub mod command_handler;
pub mod display_event_handler;
mod drag_handler;
pub mod layout_handler;
mod monitor_handler;
mod selection_handler;
mod window_handler;

use super::config::Config;
use super::display_action::DisplayAction;
use super::display_servers::DisplayServer;
use super::models::{Handle, Manager};
use super::DisplayEvent;
