//! Session that runs an action from a terminal instead of msiexec.

use super::{Button, Buttons, Session};
use crate::cli::OutputManager;
use crate::error::Result;
use std::collections::BTreeMap;

/// Host stand-in with fixed properties and pre-answered message boxes.
#[derive(Debug, Clone)]
pub struct ConsoleSession {
    properties: BTreeMap<String, String>,
    answer: Button,
    output: OutputManager,
}

impl ConsoleSession {
    /// Create a session serving `properties` and answering OK/Cancel boxes with `answer`.
    pub fn new(properties: BTreeMap<String, String>, answer: Button, output: OutputManager) -> Self {
        Self {
            properties,
            answer,
            output,
        }
    }
}

impl Session for ConsoleSession {
    fn log(&self, message: &str) {
        log::debug!("{message}");
        self.output.log_line(message);
    }

    fn property(&self, name: &str) -> Result<String> {
        match self.properties.get(name) {
            Some(value) => Ok(value.clone()),
            None => {
                log::warn!("Property {name} is not set, reading it as empty");
                Ok(String::new())
            }
        }
    }

    fn message_box(&self, text: &str, buttons: Buttons) -> Result<Button> {
        let (choices, answer) = match buttons {
            Buttons::Ok => ("[OK]", Button::Ok),
            Buttons::OkCancel => ("[OK/Cancel]", self.answer),
        };
        let label = match answer {
            Button::Ok => "OK",
            Button::Cancel => "Cancel",
        };
        self.output.message_box(text, choices, label);
        Ok(answer)
    }
}
