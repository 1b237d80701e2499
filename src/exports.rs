//! DLL entry points referenced by the installer's CustomAction table.
//!
//! Each export takes the session handle from the engine and returns a Win32
//! status (`ERROR_SUCCESS`, `ERROR_INSTALL_USEREXIT` or
//! `ERROR_INSTALL_FAILURE`).
#![allow(unsafe_code)]
#![allow(non_snake_case)]

use crate::actions::Action;
use crate::config::ActionConfig;
use crate::process::GuiLauncher;
use crate::session::MsiSession;
use windows::Win32::System::ApplicationInstallationAndServicing::MSIHANDLE;

fn dispatch(handle: MSIHANDLE, action: Action) -> u32 {
    let session = MsiSession::new(handle);
    let config = ActionConfig::default();
    let runner = GuiLauncher::from_config(&config);
    action.run(&session, &runner, &config).code()
}

/// Uninstall BaroboLink; `CustomActionData` = uninstaller path.
#[unsafe(no_mangle)]
pub extern "system" fn uninstallBaroboLink(handle: MSIHANDLE) -> u32 {
    dispatch(handle, Action::UninstallBaroboLink)
}

/// Uninstall an old Linkbot Labs; `CustomActionData` = baromeshd path.
#[unsafe(no_mangle)]
pub extern "system" fn uninstallOldLinkbotLabs(handle: MSIHANDLE) -> u32 {
    dispatch(handle, Action::UninstallOldLinkbotLabs)
}

/// Uninstall the package named by `NSISPACKAGEUNINSTALLER`.
#[unsafe(no_mangle)]
pub extern "system" fn uninstallNsisPackage(handle: MSIHANDLE) -> u32 {
    dispatch(handle, Action::UninstallNsisPackage)
}

/// Copy the chbarobo binding; `CustomActionData` = `<binding>;<Ch home>`.
#[unsafe(no_mangle)]
pub extern "system" fn copyChBinding(handle: MSIHANDLE) -> u32 {
    dispatch(handle, Action::CopyChBinding)
}

/// Run DPInst; `CustomActionData` = `<program>;<arguments>`.
#[unsafe(no_mangle)]
pub extern "system" fn installLinkbotDriver(handle: MSIHANDLE) -> u32 {
    dispatch(handle, Action::InstallLinkbotDriver)
}
