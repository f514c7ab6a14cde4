//! Status display collaborators
//!
//! The monitor creates its display once, when monitoring becomes active, and
//! then replaces the shown text after every successful poll.

pub mod log_line;
pub mod terminal;

pub use log_line::LogStatusLine;
pub use terminal::TerminalStatusLine;

use crate::config::DisplayMode;

/// Single-line, in-place status display
#[cfg_attr(test, mockall::automock)]
pub trait StatusDisplay: Send {
    /// Called once when monitoring becomes active; nothing is shown yet
    fn create(&mut self);

    /// Replace the displayed text and make it visible
    fn publish(&mut self, text: &str);
}

impl<T: StatusDisplay + ?Sized> StatusDisplay for Box<T> {
    fn create(&mut self) {
        (**self).create()
    }

    fn publish(&mut self, text: &str) {
        (**self).publish(text)
    }
}

/// Build the display selected in configuration
pub fn display_for(mode: DisplayMode) -> Box<dyn StatusDisplay> {
    match mode {
        DisplayMode::Terminal => Box::new(TerminalStatusLine::stdout()),
        DisplayMode::Log => Box::new(LogStatusLine::default()),
    }
}
