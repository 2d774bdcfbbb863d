use crate::models::{Handle, WindowHandle};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// -1 towards the start of the tiling or column, 1 towards the end.
    #[must_use]
    pub const fn step(self) -> i32 {
        match self {
            Self::Left | Self::Up => -1,
            Self::Right | Self::Down => 1,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown direction: {0}")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(ParseDirectionError(s.to_owned())),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub enum Command<H: Handle> {
    Switch(Direction),
    SwitchFirst,
    SwitchLast,
    Swap(Direction),
    Slurp,
    Barf,
    ResizeByDelta { dw: i32, dh: i32 },
    ToggleMaximize,
    CycleWidth,
    CycleHeight,
    Center,
    ToggleFullScreen,
    Reload,
    #[serde(bound = "")]
    BeginDrag(WindowHandle<H>),
    DragMotion(i32, i32),
    EndDrag,
}
