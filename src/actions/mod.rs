//! The custom actions and the boundary they run behind.
//!
//! Every action reads its input from the session, does its work, and returns
//! a [`Result`]. [`run_action`] is the single place where errors and panics
//! are turned into a message box and an [`ActionStatus`] for the engine.

pub mod binding;
pub mod driver;
pub mod uninstall;

use crate::config::ActionConfig;
use crate::error::Result;
use crate::process::ProcessRunner;
use crate::session::{ActionStatus, Buttons, Session};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Property holding the data of a deferred custom action.
pub const CUSTOM_ACTION_DATA: &str = "CustomActionData";

/// Custom actions exported to the installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Action {
    /// Uninstall a BaroboLink installation from its uninstaller path
    UninstallBaroboLink,
    /// Uninstall an old Linkbot Labs found via its baromeshd path
    UninstallOldLinkbotLabs,
    /// Uninstall the NSIS package named by NSISPACKAGEUNINSTALLER
    UninstallNsisPackage,
    /// Copy the chbarobo binding into a Ch installation
    CopyChBinding,
    /// Install the Linkbot USB driver with DPInst
    InstallLinkbotDriver,
}

impl Action {
    /// Symbol name the installer references in its CustomAction table.
    pub const fn export_name(self) -> &'static str {
        match self {
            Action::UninstallBaroboLink => "uninstallBaroboLink",
            Action::UninstallOldLinkbotLabs => "uninstallOldLinkbotLabs",
            Action::UninstallNsisPackage => "uninstallNsisPackage",
            Action::CopyChBinding => "copyChBinding",
            Action::InstallLinkbotDriver => "installLinkbotDriver",
        }
    }

    /// Run the action behind the error boundary.
    pub fn run<S, R>(self, session: &S, runner: &R, config: &ActionConfig) -> ActionStatus
    where
        S: Session,
        R: ProcessRunner,
    {
        run_action(session, self.export_name(), || match self {
            Action::UninstallBaroboLink => {
                uninstall::uninstall_barobo_link(session, runner, config)
            }
            Action::UninstallOldLinkbotLabs => {
                uninstall::uninstall_old_linkbot_labs(session, runner, config)
            }
            Action::UninstallNsisPackage => {
                uninstall::uninstall_nsis_property(session, runner, config)
            }
            Action::CopyChBinding => binding::copy_ch_binding(session),
            Action::InstallLinkbotDriver => driver::install_linkbot_driver(session, runner),
        })
    }
}

/// Run `body` as the action `name`, converting any failure into a status.
///
/// Errors and panics are shown to the user as `Exception: ...` and become
/// [`ActionStatus::Failure`]. Nothing unwinds past this function.
pub fn run_action<S, F>(session: &S, name: &str, body: F) -> ActionStatus
where
    S: Session,
    F: FnOnce() -> Result<ActionStatus>,
{
    session.log(name);

    let message = match catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(status)) => {
            log::info!("{name} finished: {}", status.label());
            return status;
        }
        Ok(Err(e)) => e.to_string(),
        Err(panic) => panic_message(panic.as_ref()),
    };

    log::error!("{name} failed: {message}");
    let text = format!("Exception: {message}");
    session.log(&text);
    if let Err(e) = session.message_box(&text, Buttons::Ok) {
        log::warn!("Unable to show error message box: {e}");
    }
    ActionStatus::Failure
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic with unknown payload".to_string()
    }
}
