//! Console host for the Linkbot installer custom actions.

use linkbot_custom_actions::cli;
use linkbot_custom_actions::cli::OutputManager;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match cli::run() {
        Ok(status) => ExitCode::from(cli::exit_code(status)),
        Err(e) => {
            let output = OutputManager::new(false);
            output.error(&format!("Fatal error: {e:#}"));
            ExitCode::from(1)
        }
    }
}
