mod common;

use common::{Behavior, RecordingSession, ScriptedRunner, entries};
use linkbot_custom_actions::actions::uninstall::{NSIS_PACKAGE_UNINSTALLER, uninstall_nsis_package};
use linkbot_custom_actions::{Action, ActionConfig, ActionStatus, Button, Buttons, Error};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    _root: TempDir,
    inst_dir: PathBuf,
    uninstaller: PathBuf,
    scratch: PathBuf,
    config: ActionConfig,
}

fn fixture(product: &str, exe: &str) -> Fixture {
    let root = TempDir::new().unwrap();
    let inst_dir = root.path().join(product);
    fs::create_dir(&inst_dir).unwrap();
    let uninstaller = inst_dir.join(exe);
    fs::write(&uninstaller, b"MZ fake nsis uninstaller").unwrap();
    let scratch = root.path().join("scratch");
    fs::create_dir(&scratch).unwrap();
    let config = ActionConfig {
        temp_dir: Some(scratch.clone()),
        ..ActionConfig::default()
    };
    Fixture {
        inst_dir,
        uninstaller,
        scratch,
        config,
        _root: root,
    }
}

fn assert_scratch_copy(launch_program: &Path, scratch: &Path) {
    assert_eq!(launch_program.parent().unwrap(), scratch);
    let name = launch_program.file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("nsis-uninstaller-"), "{name}");
    assert!(name.ends_with(".exe"), "{name}");
}

#[test]
fn runs_scratch_copy_against_install_dir_then_deletes_it() {
    let fx = fixture("BaroboLink", "uninstall.exe");
    let session = RecordingSession::new(Button::Ok);
    let runner = ScriptedRunner::new(Behavior::Exit(0));

    let status = uninstall_nsis_package(&session, &runner, &fx.config, &fx.uninstaller).unwrap();

    assert_eq!(status, ActionStatus::Success);
    let launch = runner.only_launch();
    assert_scratch_copy(&launch.program, &fx.scratch);
    assert_eq!(
        launch.contents.as_deref(),
        Some(&b"MZ fake nsis uninstaller"[..])
    );
    assert_eq!(launch.args, format!("_?={}", fx.inst_dir.display()));
    assert!(entries(&fx.scratch).is_empty());
    assert!(fx.uninstaller.exists(), "original uninstaller must be left alone");
    assert!(session.logged("Copying"));
    assert!(session.logged("Deleted"));
}

#[test]
fn prompt_names_product_and_install_dir() {
    let fx = fixture("BaroboLink", "uninstall.exe");
    let session = RecordingSession::new(Button::Ok);
    let runner = ScriptedRunner::new(Behavior::Exit(0));

    uninstall_nsis_package(&session, &runner, &fx.config, &fx.uninstaller).unwrap();

    let boxes = session.boxes.borrow();
    assert_eq!(boxes.len(), 1);
    let (text, buttons) = &boxes[0];
    assert_eq!(*buttons, Buttons::OkCancel);
    assert_eq!(
        *text,
        format!(
            "BaroboLink is currently installed at {}, and must be uninstalled before \
             proceeding.\n\nClick OK to uninstall BaroboLink.",
            fx.inst_dir.display()
        )
    );
}

#[test]
fn cancel_returns_user_exit_without_launching() {
    let fx = fixture("BaroboLink", "uninstall.exe");
    let session = RecordingSession::new(Button::Cancel);
    let runner = ScriptedRunner::new(Behavior::Exit(0));

    let status = uninstall_nsis_package(&session, &runner, &fx.config, &fx.uninstaller).unwrap();

    assert_eq!(status, ActionStatus::UserExit);
    assert!(runner.launches.borrow().is_empty());
    assert!(entries(&fx.scratch).is_empty());
    assert!(session.logged("User pressed cancel, aborting."));
}

#[test]
fn non_zero_exit_is_failure_and_scratch_copy_is_removed() {
    let fx = fixture("BaroboLink", "uninstall.exe");
    let session = RecordingSession::new(Button::Ok);
    let runner = ScriptedRunner::new(Behavior::Exit(2));

    let status = uninstall_nsis_package(&session, &runner, &fx.config, &fx.uninstaller).unwrap();

    assert_eq!(status, ActionStatus::Failure);
    assert!(entries(&fx.scratch).is_empty());
}

#[test]
fn launch_error_propagates_and_scratch_copy_is_removed() {
    let fx = fixture("BaroboLink", "uninstall.exe");
    let session = RecordingSession::new(Button::Ok);
    let runner = ScriptedRunner::new(Behavior::LaunchError);

    let err = uninstall_nsis_package(&session, &runner, &fx.config, &fx.uninstaller).unwrap_err();

    assert!(matches!(err, Error::CommandFailed { .. }), "{err}");
    assert_eq!(runner.launches.borrow().len(), 1);
    assert!(entries(&fx.scratch).is_empty());
    assert!(session.logged("Deleted"));
}

#[test]
fn panicking_launch_still_removes_scratch_copy() {
    let fx = fixture("BaroboLink", "uninstall.exe");
    let session = RecordingSession::new(Button::Ok).with_property(
        "CustomActionData",
        fx.uninstaller.display().to_string(),
    );
    let runner = ScriptedRunner::new(Behavior::Panic);

    let status = Action::UninstallBaroboLink.run(&session, &runner, &fx.config);

    assert_eq!(status, ActionStatus::Failure);
    assert!(entries(&fx.scratch).is_empty());
    assert!(
        session
            .box_texts()
            .iter()
            .any(|text| text == "Exception: panic: runner blew up")
    );
}

#[test]
fn missing_uninstaller_fails_after_confirmation_and_leaves_no_scratch_file() {
    let fx = fixture("BaroboLink", "uninstall.exe");
    fs::remove_file(&fx.uninstaller).unwrap();
    let session = RecordingSession::new(Button::Ok);
    let runner = ScriptedRunner::new(Behavior::Exit(0));

    let err = uninstall_nsis_package(&session, &runner, &fx.config, &fx.uninstaller).unwrap_err();

    assert!(err.to_string().contains("copying uninstaller"), "{err}");
    assert!(runner.launches.borrow().is_empty());
    assert!(entries(&fx.scratch).is_empty());
}

#[test]
fn barobo_link_reads_custom_action_data() {
    let fx = fixture("BaroboLink", "uninstall.exe");
    let session = RecordingSession::new(Button::Ok).with_property(
        "CustomActionData",
        fx.uninstaller.display().to_string(),
    );
    let runner = ScriptedRunner::new(Behavior::Exit(0));

    let status = Action::UninstallBaroboLink.run(&session, &runner, &fx.config);

    assert_eq!(status, ActionStatus::Success);
    assert_eq!(session.log.borrow()[0], "uninstallBaroboLink");
    assert_eq!(runner.only_launch().args, format!("_?={}", fx.inst_dir.display()));
}

#[test]
fn old_linkbot_labs_finds_uninstaller_next_to_baromeshd() {
    let fx = fixture("Linkbot Labs", "Uninstall.exe");
    let baromeshd = fx.inst_dir.join("baromeshd.exe");
    fs::write(&baromeshd, b"daemon").unwrap();
    let session = RecordingSession::new(Button::Ok)
        .with_property("CustomActionData", baromeshd.display().to_string());
    let runner = ScriptedRunner::new(Behavior::Exit(0));

    let status = Action::UninstallOldLinkbotLabs.run(&session, &runner, &fx.config);

    assert_eq!(status, ActionStatus::Success);
    let launch = runner.only_launch();
    assert_eq!(
        launch.contents.as_deref(),
        Some(&b"MZ fake nsis uninstaller"[..])
    );
    assert!(session.box_texts()[0].starts_with("Linkbot Labs is currently installed at"));
}

#[test]
fn nsis_package_reads_its_own_property() {
    let fx = fixture("SomeTool", "uninst.exe");
    let session = RecordingSession::new(Button::Ok)
        .with_property(NSIS_PACKAGE_UNINSTALLER, fx.uninstaller.display().to_string())
        .with_property("CustomActionData", "ignored");
    let runner = ScriptedRunner::new(Behavior::Exit(0));

    let status = Action::UninstallNsisPackage.run(&session, &runner, &fx.config);

    assert_eq!(status, ActionStatus::Success);
    assert_scratch_copy(&runner.only_launch().program, &fx.scratch);
}

#[test]
fn empty_property_fails_without_prompting() {
    let fx = fixture("BaroboLink", "uninstall.exe");
    let session = RecordingSession::new(Button::Ok);
    let runner = ScriptedRunner::new(Behavior::Exit(0));

    let status = Action::UninstallBaroboLink.run(&session, &runner, &fx.config);

    assert_eq!(status, ActionStatus::Failure);
    let boxes = session.boxes.borrow();
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].1, Buttons::Ok);
    assert!(boxes[0].0.starts_with("Exception: property CustomActionData is malformed"));
    assert!(runner.launches.borrow().is_empty());
}
