//! Filesystem and path helpers shared by the custom actions.

pub mod fs;
