//! The installer host as seen by a custom action.
//!
//! Actions only ever talk to the host through [`Session`]: they read string
//! properties, write log lines and pop message boxes. The Windows Installer
//! engine is one implementation (`MsiSession`, Windows only); [`ConsoleSession`] stands in
//! for it when an action is run from a terminal.

mod console;
#[cfg(windows)]
mod msi;

pub use console::ConsoleSession;
#[cfg(windows)]
pub use msi::MsiSession;

use crate::error::Result;

/// Buttons offered by a modal message box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buttons {
    /// A single OK button
    Ok,
    /// OK and Cancel
    OkCancel,
}

/// The button the user pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// OK was pressed
    Ok,
    /// Cancel was pressed or the box was dismissed
    Cancel,
}

/// Status handed back to the installer engine when an action returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// `ERROR_SUCCESS`
    Success,
    /// `ERROR_INSTALL_USEREXIT`: the user cancelled
    UserExit,
    /// `ERROR_INSTALL_FAILURE`: the action failed and setup should roll back
    Failure,
}

impl ActionStatus {
    /// Win32 error code the engine expects.
    pub const fn code(self) -> u32 {
        match self {
            Self::Success => 0,
            Self::UserExit => 1602,
            Self::Failure => 1603,
        }
    }

    /// Lower-case label used in console output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::UserExit => "user exit",
            Self::Failure => "failure",
        }
    }
}

/// Connection to the installer host for the duration of one action.
pub trait Session {
    /// Write a line to the host log. Never fails; problems are reported via `log`.
    fn log(&self, message: &str);

    /// Read a property. Unset properties read as the empty string.
    fn property(&self, name: &str) -> Result<String>;

    /// Show a modal message box and wait for the user's answer.
    fn message_box(&self, text: &str, buttons: Buttons) -> Result<Button>;
}
