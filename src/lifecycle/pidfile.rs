//! Process id file.
//!
//! The harness that launches the server reads this file to find the process
//! and kill it when a test is done.

use std::fs;
use std::io;
use std::path::Path;

/// Write the current process id, followed by a newline, to `path`.
///
/// Returns the id written. An existing file is replaced.
pub fn write_pid_file(path: &Path) -> io::Result<u32> {
    let pid = std::process::id();
    fs::write(path, format!("{}\n", pid))?;
    Ok(pid)
}
