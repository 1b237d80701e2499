//! # Linkbot custom actions
//!
//! Windows Installer custom actions for the Linkbot Labs installer.
//!
//! Built as a `cdylib`, the crate exports one `extern "system"` function per
//! action. The engine calls it with a session handle; the action reads its
//! properties, does a little filesystem or process work, and returns a Win32
//! status.
//!
//! ## Actions
//!
//! - **uninstallBaroboLink / uninstallOldLinkbotLabs / uninstallNsisPackage**:
//!   confirm with the user, run an NSIS uninstaller from a scratch copy
//! - **copyChBinding**: copy the chbarobo binding into a Ch installation
//! - **installLinkbotDriver**: run DPInst and interpret its exit code
//!
//! The actions only see the host through [`session::Session`] and only start
//! processes through [`process::ProcessRunner`], so they run unchanged from
//! the `custom_action_host` console binary and from tests.

// Unsafe code is confined to the Windows session and the DLL exports.
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod actions;
pub mod cli;
pub mod config;
pub mod error;
#[cfg(windows)]
pub mod exports;
pub mod process;
pub mod property;
pub mod session;
pub mod utils;

pub use actions::{Action, run_action};
pub use config::ActionConfig;
pub use error::{Error, Result};
pub use process::{GuiLauncher, ProcessRunner};
pub use session::{ActionStatus, Button, Buttons, ConsoleSession, Session};
