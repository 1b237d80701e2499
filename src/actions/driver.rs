//! USB driver installation through DPInst.
//!
//! DPInst packs its result into the exit code as `0xWWXXYYZZ`: `WW` holds
//! flags, `XX` counts packages that failed, `YY` packages copied to the
//! driver store only, `ZZ` packages installed.

use super::CUSTOM_ACTION_DATA;
use crate::error::Result;
use crate::process::ProcessRunner;
use crate::property::split_command_line;
use crate::session::{ActionStatus, Buttons, Session};
use std::fmt;

/// At least one driver package could not be installed.
pub const DPINST_ERROR_FLAG: u32 = 0x8000_0000;
/// A reboot is needed to finish installation.
pub const DPINST_REBOOT_FLAG: u32 = 0x4000_0000;

/// Decoded DPInst exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpinstResult(pub u32);

impl DpinstResult {
    /// Error flag is set.
    pub fn error(self) -> bool {
        self.0 & DPINST_ERROR_FLAG != 0
    }

    /// Reboot flag is set.
    pub fn reboot_required(self) -> bool {
        self.0 & DPINST_REBOOT_FLAG != 0
    }

    /// Packages that could not be installed.
    pub fn failed(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Packages copied to the driver store but not installed on a device.
    pub fn staged(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Packages installed on a device.
    pub fn installed(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for DpinstResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#010x} (installed {}, staged {}, failed {})",
            self.0,
            self.installed(),
            self.staged(),
            self.failed()
        )
    }
}

/// `installLinkbotDriver`: `CustomActionData` is `<dpinst.exe>;<arguments>`.
pub fn install_linkbot_driver<S, R>(session: &S, runner: &R) -> Result<ActionStatus>
where
    S: Session,
    R: ProcessRunner,
{
    let raw = session.property(CUSTOM_ACTION_DATA)?;
    let (program, args) = split_command_line(CUSTOM_ACTION_DATA, &raw)?;

    session.log(&format!("Running {} {}", program.display(), args));
    let code = runner.run_gui(&program, &args)?;
    // DPInst's code is a bit field; the signed process status is reinterpreted.
    let result = DpinstResult(code as u32);
    session.log(&format!("DPInst return code: {code} {result}"));

    if result.error() {
        session.message_box(&format!("DPInst error flag set: {code}"), Buttons::Ok)?;
        return Ok(ActionStatus::Failure);
    }
    if result.reboot_required() {
        session.message_box(&format!("DPInst reboot flag set: {code}"), Buttons::Ok)?;
        return Ok(ActionStatus::Failure);
    }
    Ok(ActionStatus::Success)
}
