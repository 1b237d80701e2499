//! Launching external installer programs.
//!
//! NSIS uninstallers and DPInst are GUI programs. Started directly they
//! return immediately and hand off to a detached process, so on Windows
//! they are started through `cmd.exe /c start "" /b /wait`, which blocks
//! until the real work is done.

use crate::config::ActionConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs a program to completion and reports its exit code.
pub trait ProcessRunner {
    /// Run `program` with the raw argument string `args`, blocking until it exits.
    ///
    /// A child terminated without an exit code reports `-1`.
    fn run_gui(&self, program: &Path, args: &str) -> Result<i32>;
}

/// Command line handed to the shell after `/c`.
pub fn start_command_line(program: &Path, args: &str) -> String {
    let line = format!("start \"\" /b /wait \"{}\"", program.display());
    if args.is_empty() {
        line
    } else {
        format!("{line} {args}")
    }
}

/// NSIS install directory switch. It has to come last and takes the rest of
/// the command line, spaces included.
pub const NSIS_DIR_SWITCH: &str = "_?=";

/// Split a raw argument string the way the programs launched here parse it.
///
/// Arguments are separated by whitespace, except that everything from an
/// argument starting with `_?=` to the end of the line is one argument.
pub fn split_args(args: &str) -> Vec<&str> {
    let mut split = Vec::new();
    let mut rest = args.trim();
    while !rest.is_empty() {
        if rest.starts_with(NSIS_DIR_SWITCH) {
            split.push(rest);
            break;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        split.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    split
}

/// [`ProcessRunner`] that starts real processes.
#[derive(Debug, Clone)]
pub struct GuiLauncher {
    shell: PathBuf,
}

impl GuiLauncher {
    /// Launcher using `shell` as the command interpreter on Windows.
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// Launcher using the configured shell.
    pub fn from_config(config: &ActionConfig) -> Self {
        Self::new(config.shell.clone())
    }

    #[cfg(windows)]
    fn command(&self, program: &Path, args: &str) -> Command {
        use std::os::windows::process::CommandExt;
        use windows::Win32::System::Threading::CREATE_NO_WINDOW;

        let mut command = Command::new(&self.shell);
        // Quoting is cmd.exe's, not the CRT's, so skip std's argument escaping.
        command
            .arg("/c")
            .raw_arg(start_command_line(program, args))
            .creation_flags(CREATE_NO_WINDOW.0);
        command
    }

    #[cfg(not(windows))]
    fn command(&self, program: &Path, args: &str) -> Command {
        log::debug!(
            "No {} off Windows, running {} directly",
            self.shell.display(),
            program.display()
        );
        let mut command = Command::new(program);
        command.args(split_args(args));
        command
    }
}

impl ProcessRunner for GuiLauncher {
    fn run_gui(&self, program: &Path, args: &str) -> Result<i32> {
        let mut command = self.command(program, args);
        log::info!("Launching {} {}", program.display(), args);

        let status = command.status().map_err(|error| Error::CommandFailed {
            command: format!("{} {}", program.display(), args),
            error,
        })?;

        let code = status.code().unwrap_or(-1);
        log::debug!("{} exited with {}", program.display(), code);
        Ok(code)
    }
}
