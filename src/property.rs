//! Parsing of installer-supplied property strings.
//!
//! Deferred custom actions get all their input through one string,
//! `CustomActionData`, so several values are packed into it with `;`.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Separator between the packed values of a property.
pub const SEPARATOR: char = ';';

fn malformed(name: &str, reason: &'static str, value: &str) -> Error {
    Error::MalformedProperty {
        name: name.to_string(),
        reason,
        value: value.to_string(),
    }
}

/// Splits a `source;destination` pair.
///
/// Requires exactly one separator and a non-blank value on each side.
pub fn split_pair(name: &str, raw: &str) -> Result<(String, String)> {
    let mut parts = raw.split(SEPARATOR);
    let (Some(first), Some(second)) = (parts.next(), parts.next()) else {
        return Err(malformed(name, "expected two values separated by ';'", raw));
    };
    if parts.next().is_some() {
        return Err(malformed(name, "more than one ';'", raw));
    }
    let (first, second) = (first.trim(), second.trim());
    if first.is_empty() || second.is_empty() {
        return Err(malformed(name, "empty path in pair", raw));
    }
    Ok((first.to_string(), second.to_string()))
}

/// Splits a `program;arguments` command line at the first separator.
///
/// Everything after the first `;` belongs to the arguments, which may be
/// empty or absent. A blank program is rejected.
pub fn split_command_line(name: &str, raw: &str) -> Result<(PathBuf, String)> {
    let (program, args) = match raw.split_once(SEPARATOR) {
        Some((program, args)) => (program.trim(), args.trim()),
        None => (raw.trim(), ""),
    };
    if program.is_empty() {
        return Err(malformed(name, "no program before ';'", raw));
    }
    Ok((PathBuf::from(program), args.to_string()))
}

/// Rejects a property value that is blank.
pub fn require_path(name: &str, raw: &str) -> Result<PathBuf> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(malformed(name, "empty value", raw));
    }
    Ok(PathBuf::from(value))
}

/// Last normal component of `path`, ignoring any trailing separator.
pub fn final_component(path: &Path) -> Result<String> {
    match path.components().next_back() {
        Some(Component::Normal(name)) => Ok(name.to_string_lossy().into_owned()),
        _ => Err(Error::GenericError(format!(
            "{} has no final path component",
            path.display()
        ))),
    }
}

/// Walks `levels` parent directories up from `path`.
pub fn ancestor(path: &Path, levels: usize) -> Result<PathBuf> {
    let mut current = path;
    for _ in 0..levels {
        current = current
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .ok_or_else(|| {
                Error::GenericError(format!(
                    "{} has fewer than {levels} parent directories",
                    path.display()
                ))
            })?;
    }
    Ok(current.to_path_buf())
}
