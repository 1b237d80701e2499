//! Command line argument parsing for the console host.

use crate::actions::Action;
use crate::config::ActionConfig;
use crate::session::Button;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Run a Linkbot installer custom action outside msiexec
#[derive(Parser, Debug)]
#[command(
    name = "custom_action_host",
    version,
    about = "Run a Linkbot installer custom action outside msiexec",
    long_about = "Runs one of the installer's custom actions against a console session.
Properties come from --properties FILE (TOML, NAME = \"value\") and
--property NAME=VALUE flags; flags win. Message boxes are printed and
answered with --answer.

Usage:
  custom_action_host copy-ch-binding -p \"CustomActionData=C:/LL/chbarobo/;C:/Ch\"
  custom_action_host uninstall-nsis-package --properties props.toml --answer cancel"
)]
pub struct Args {
    /// Custom action to run
    #[arg(index = 1, value_enum, value_name = "ACTION")]
    pub action: Action,

    /// Property assignment, repeatable
    #[arg(short = 'p', long = "property", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub properties: Vec<(String, String)>,

    /// TOML file of property assignments
    #[arg(long = "properties", value_name = "FILE")]
    pub properties_file: Option<PathBuf>,

    /// Answer given to OK/Cancel message boxes
    #[arg(long, value_enum, default_value_t = Answer::Ok)]
    pub answer: Answer,

    /// Command interpreter used to start GUI programs (defaults to %ComSpec%)
    #[arg(long, value_name = "PATH")]
    pub shell: Option<PathBuf>,

    /// Directory for scratch copies of uninstallers
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Suppress log lines and message boxes
    #[arg(short, long)]
    pub quiet: bool,
}

/// Scripted reply to OK/Cancel prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Answer {
    /// Press OK
    Ok,
    /// Press Cancel
    Cancel,
}

impl From<Answer> for Button {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Ok => Button::Ok,
            Answer::Cancel => Button::Cancel,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Action configuration with command line overrides applied
    pub fn action_config(&self) -> ActionConfig {
        let mut config = ActionConfig::default();
        if let Some(shell) = &self.shell {
            config.shell = shell.clone();
        }
        config.temp_dir = self.temp_dir.clone();
        config
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing property name in {raw:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}
