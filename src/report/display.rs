//! Hand a rendered chart to the platform's default image viewer.

use crate::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

#[cfg(target_os = "macos")]
fn viewer(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn viewer(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

/// Open `path` in the default viewer without waiting for it to close.
///
/// # Errors
///
/// Returns [`Error::Display`] if the file is missing or the viewer cannot be
/// started.
pub fn open(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::Display(format!("{} does not exist", path.display())));
    }

    let mut command = viewer(path);
    debug!(?command, "Opening chart");

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
        .map_err(|e| Error::Display(format!("{}: {e}", path.display())))
}
