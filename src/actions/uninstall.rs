//! Removal of NSIS-installed predecessors before our own install proceeds.
//!
//! An NSIS uninstaller deletes its own directory, itself included, so it is
//! run from a scratch copy in the temp directory and pointed back at the
//! install directory with `_?=<dir>`. The scratch copy is removed however
//! the run ends.

use super::CUSTOM_ACTION_DATA;
use crate::config::ActionConfig;
use crate::error::{ErrorExt, Result};
use crate::process::{NSIS_DIR_SWITCH, ProcessRunner};
use crate::property::{ancestor, final_component, require_path};
use crate::session::{ActionStatus, Button, Buttons, Session};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Property naming the uninstaller for [`uninstall_nsis_property`].
pub const NSIS_PACKAGE_UNINSTALLER: &str = "NSISPACKAGEUNINSTALLER";

/// Uninstaller that sits next to `baromeshd` in old Linkbot Labs installs.
pub const LINKBOT_LABS_UNINSTALLER: &str = "Uninstall.exe";

/// `uninstallBaroboLink`: `CustomActionData` is the uninstaller path.
///
/// The action runs deferred with elevated rights, so public properties are
/// gone by then and the path arrives through `CustomActionData`.
pub fn uninstall_barobo_link<S, R>(
    session: &S,
    runner: &R,
    config: &ActionConfig,
) -> Result<ActionStatus>
where
    S: Session,
    R: ProcessRunner,
{
    let uninstaller = require_path(CUSTOM_ACTION_DATA, &session.property(CUSTOM_ACTION_DATA)?)?;
    uninstall_nsis_package(session, runner, config, &uninstaller)
}

/// `uninstallOldLinkbotLabs`: `CustomActionData` is the path of `baromeshd`.
pub fn uninstall_old_linkbot_labs<S, R>(
    session: &S,
    runner: &R,
    config: &ActionConfig,
) -> Result<ActionStatus>
where
    S: Session,
    R: ProcessRunner,
{
    let baromeshd = require_path(CUSTOM_ACTION_DATA, &session.property(CUSTOM_ACTION_DATA)?)?;
    let uninstaller = ancestor(&baromeshd, 1)?.join(LINKBOT_LABS_UNINSTALLER);
    uninstall_nsis_package(session, runner, config, &uninstaller)
}

/// `uninstallNsisPackage`: the uninstaller path is in `NSISPACKAGEUNINSTALLER`.
pub fn uninstall_nsis_property<S, R>(
    session: &S,
    runner: &R,
    config: &ActionConfig,
) -> Result<ActionStatus>
where
    S: Session,
    R: ProcessRunner,
{
    let uninstaller = require_path(
        NSIS_PACKAGE_UNINSTALLER,
        &session.property(NSIS_PACKAGE_UNINSTALLER)?,
    )?;
    uninstall_nsis_package(session, runner, config, &uninstaller)
}

/// Confirm with the user, then run `uninstaller` against its own directory.
///
/// Returns [`ActionStatus::UserExit`] on cancel and
/// [`ActionStatus::Failure`] when the uninstaller exits non-zero.
pub fn uninstall_nsis_package<S, R>(
    session: &S,
    runner: &R,
    config: &ActionConfig,
    uninstaller: &Path,
) -> Result<ActionStatus>
where
    S: Session,
    R: ProcessRunner,
{
    let inst_dir = ancestor(uninstaller, 1)?;
    let product_name = final_component(&inst_dir)?;

    let button = session.message_box(
        &format!(
            "{product_name} is currently installed at {}, and must be uninstalled before \
             proceeding.\n\nClick OK to uninstall {product_name}.",
            inst_dir.display()
        ),
        Buttons::OkCancel,
    )?;
    if button == Button::Cancel {
        session.log("User pressed cancel, aborting.");
        return Ok(ActionStatus::UserExit);
    }

    let scratch = ScratchCopy::create(session, uninstaller, config)?;
    let switch = format!("{NSIS_DIR_SWITCH}{}", inst_dir.display());
    let code = runner.run_gui(scratch.path(), &switch)?;
    session.log(&format!("{product_name} uninstaller exited with {code}"));

    if code != 0 {
        return Ok(ActionStatus::Failure);
    }
    Ok(ActionStatus::Success)
}

/// Uniquely named copy of an uninstaller, deleted when dropped.
///
/// Deletion runs on every exit path, including unwinding, and the outcome
/// goes to the session log.
struct ScratchCopy<'s, S: Session> {
    session: &'s S,
    path: Option<TempPath>,
    display: PathBuf,
}

impl<'s, S: Session> ScratchCopy<'s, S> {
    fn create(session: &'s S, original: &Path, config: &ActionConfig) -> Result<Self> {
        let dir = config.temp_dir();
        let path = tempfile::Builder::new()
            .prefix(&config.uninstaller_prefix)
            .suffix(".exe")
            .rand_bytes(16)
            .tempfile_in(&dir)
            .fs_context("creating temporary file in", &dir)?
            .into_temp_path();

        session.log(&format!(
            "Copying {} -> {}",
            original.display(),
            path.display()
        ));
        let scratch = Self {
            session,
            display: path.to_path_buf(),
            path: Some(path),
        };
        fs::copy(original, &scratch.display).fs_context("copying uninstaller", original)?;
        Ok(scratch)
    }

    fn path(&self) -> &Path {
        &self.display
    }
}

impl<S: Session> Drop for ScratchCopy<'_, S> {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        match path.close() {
            Ok(()) => self
                .session
                .log(&format!("Deleted {}", self.display.display())),
            Err(e) => {
                log::warn!("Failed to delete {}: {e}", self.display.display());
                self.session
                    .log(&format!("Failed to delete {}: {e}", self.display.display()));
            }
        }
    }
}
