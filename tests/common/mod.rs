//! Shared fixtures: a recording session and a scripted process runner.
#![allow(dead_code)]

use linkbot_custom_actions::error::{Error, Result};
use linkbot_custom_actions::{Button, Buttons, ProcessRunner, Session};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Session that serves fixed properties and records everything shown to the user.
pub struct RecordingSession {
    properties: BTreeMap<String, String>,
    answer: Button,
    pub log: RefCell<Vec<String>>,
    pub boxes: RefCell<Vec<(String, Buttons)>>,
}

impl RecordingSession {
    pub fn new(answer: Button) -> Self {
        Self {
            properties: BTreeMap::new(),
            answer,
            log: RefCell::new(Vec::new()),
            boxes: RefCell::new(Vec::new()),
        }
    }

    pub fn with_property(mut self, name: &str, value: impl Into<String>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    pub fn logged(&self, needle: &str) -> bool {
        self.log.borrow().iter().any(|line| line.contains(needle))
    }

    pub fn box_texts(&self) -> Vec<String> {
        self.boxes.borrow().iter().map(|(text, _)| text.clone()).collect()
    }
}

impl Session for RecordingSession {
    fn log(&self, message: &str) {
        self.log.borrow_mut().push(message.to_string());
    }

    fn property(&self, name: &str) -> Result<String> {
        Ok(self.properties.get(name).cloned().unwrap_or_default())
    }

    fn message_box(&self, text: &str, buttons: Buttons) -> Result<Button> {
        self.boxes.borrow_mut().push((text.to_string(), buttons));
        Ok(match buttons {
            Buttons::Ok => Button::Ok,
            Buttons::OkCancel => self.answer,
        })
    }
}

/// What the scripted runner does when asked to launch something.
#[derive(Clone, Copy)]
pub enum Behavior {
    Exit(i32),
    LaunchError,
    Panic,
}

/// A launch as seen by the runner.
#[derive(Debug, Clone)]
pub struct Launch {
    pub program: PathBuf,
    pub args: String,
    /// Program contents at launch time, `None` if it did not exist
    pub contents: Option<Vec<u8>>,
}

/// Runner that never starts a process.
pub struct ScriptedRunner {
    behavior: Behavior,
    pub launches: RefCell<Vec<Launch>>,
}

impl ScriptedRunner {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            launches: RefCell::new(Vec::new()),
        }
    }

    pub fn only_launch(&self) -> Launch {
        let launches = self.launches.borrow();
        assert_eq!(launches.len(), 1, "expected exactly one launch");
        launches[0].clone()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run_gui(&self, program: &Path, args: &str) -> Result<i32> {
        self.launches.borrow_mut().push(Launch {
            program: program.to_path_buf(),
            args: args.to_string(),
            contents: std::fs::read(program).ok(),
        });
        match self.behavior {
            Behavior::Exit(code) => Ok(code),
            Behavior::LaunchError => Err(Error::CommandFailed {
                command: program.display().to_string(),
                error: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
            }),
            Behavior::Panic => panic!("runner blew up"),
        }
    }
}

/// Names of the entries directly inside `dir`.
pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
