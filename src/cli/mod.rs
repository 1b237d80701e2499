//! Console host for the custom actions.
//!
//! Runs an action the way msiexec would, with properties taken from the
//! command line and message boxes answered up front. Used to exercise the
//! actions without building an MSI.

mod args;
mod output;

pub use args::{Answer, Args};
pub use output::OutputManager;

use crate::config::load_properties;
use crate::process::GuiLauncher;
use crate::session::{ActionStatus, ConsoleSession};
use anyhow::Context;
use std::collections::BTreeMap;

/// Main CLI entry point
pub fn run() -> anyhow::Result<ActionStatus> {
    execute(Args::parse_args())
}

/// Run the action described by `args`.
pub fn execute(args: Args) -> anyhow::Result<ActionStatus> {
    let properties = collect_properties(&args)?;
    let config = args.action_config();
    let output = OutputManager::new(args.quiet);
    let session = ConsoleSession::new(properties, args.answer.into(), output.clone());
    let runner = GuiLauncher::from_config(&config);

    let status = args.action.run(&session, &runner, &config);
    let summary = format!(
        "{} returned {} ({})",
        args.action.export_name(),
        status.code(),
        status.label()
    );
    match status {
        ActionStatus::Success => output.success(&summary),
        ActionStatus::UserExit => output.warn(&summary),
        ActionStatus::Failure => output.error(&summary),
    }
    Ok(status)
}

fn collect_properties(args: &Args) -> anyhow::Result<BTreeMap<String, String>> {
    let mut properties = match &args.properties_file {
        Some(path) => load_properties(path)
            .with_context(|| format!("loading properties from {}", path.display()))?,
        None => BTreeMap::new(),
    };
    properties.extend(args.properties.iter().cloned());
    Ok(properties)
}

/// Process exit code for a finished action.
///
/// Win32 codes do not survive Unix exit statuses, so the console host uses
/// its own small set: 0 success, 1 failure, 2 user exit.
pub fn exit_code(status: ActionStatus) -> u8 {
    match status {
        ActionStatus::Success => 0,
        ActionStatus::Failure => 1,
        ActionStatus::UserExit => 2,
    }
}
