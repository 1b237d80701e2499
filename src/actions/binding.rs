//! Installing the chbarobo binding into a Ch installation.

use super::CUSTOM_ACTION_DATA;
use crate::error::{Context, ErrorExt, Result};
use crate::property::{final_component, split_pair};
use crate::session::{ActionStatus, Session};
use crate::utils::fs::{copy_dir, copy_file_overwrite, remove_all};
use std::path::{Path, PathBuf};

/// Header shared between the binding package and the Ch toolkit.
pub const BINDING_HEADER: &str = "linkbot.h";

/// `copyChBinding`: `CustomActionData` is `<binding dir>;<Ch home>`, e.g.
/// `C:/Program Files (x86)/Linkbot Labs/chbarobo/win64/chbarobo/;C:/Ch`.
pub fn copy_ch_binding<S: Session>(session: &S) -> Result<ActionStatus> {
    let raw = session.property(CUSTOM_ACTION_DATA)?;
    let (binding, ch_home) = split_pair(CUSTOM_ACTION_DATA, &raw)?;
    let (binding, ch_home) = (PathBuf::from(binding), PathBuf::from(ch_home));

    session.log(&format!(
        "Installing {} to {}",
        binding.display(),
        ch_home.display()
    ));
    install_binding(session, &binding, &ch_home)?;
    Ok(ActionStatus::Success)
}

/// Replace `<ch_home>/package/<name>` with a copy of `binding` and refresh
/// the toolkit's copy of the binding header.
pub fn install_binding<S: Session>(session: &S, binding: &Path, ch_home: &Path) -> Result<()> {
    // The binding dir usually arrives with a trailing separator.
    let name = final_component(binding)?;
    let package_root = ch_home.join("package");
    let package_dir = package_root.join(&name);

    if remove_all(&package_dir)? {
        session.log(&format!("Removed previous {}", package_dir.display()));
    }
    std::fs::create_dir_all(&package_root).fs_context("creating directory", &package_root)?;
    copy_dir(binding, &package_dir)
        .with_context(|| format!("installing the {name} package"))?;

    let header = binding.join("include").join(BINDING_HEADER);
    let toolkit_header = ch_home.join("toolkit").join("include").join(BINDING_HEADER);
    copy_file_overwrite(&header, &toolkit_header)?;
    session.log(&format!(
        "Copied {} -> {}",
        header.display(),
        toolkit_header.display()
    ));
    Ok(())
}
