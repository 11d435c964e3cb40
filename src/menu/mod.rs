//! Menu module - Interactive chart menus

mod console;
mod state;

pub use console::{ConsoleMenu, MenuError, MenuOutcome, ReadLine};
pub use state::{ChartMenu, MenuCommand, MenuEffect, MenuState};
