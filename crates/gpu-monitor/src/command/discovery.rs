//! Locating the diagnostic program on hosts where it is not on PATH
//!
//! Discovery only inspects the filesystem. Running the program here would
//! bypass the invocation timeout, and a wedged driver can hang it.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Install locations used by NVIDIA drivers, CUDA toolkits, containers and WSL
const SEARCH_PATHS: &[&str] = &[
    "/usr/bin",
    "/usr/local/bin",
    "/bin",
    "/usr/local/nvidia/bin",
    "/usr/nvidia/bin",
    "/usr/local/cuda/bin",
    "/opt/cuda/bin",
    "/usr/lib/wsl/lib",
    "/mnt/c/Program Files/NVIDIA Corporation/NVSMI",
    "/mnt/c/Windows/System32",
];

/// Resolve `command` to an executable file
///
/// Paths containing a separator are taken as given. Bare names are looked up
/// in the PATH directories first, then in [`SEARCH_PATHS`] (also as
/// `<name>.exe` for WSL).
pub fn find_command(command: &str) -> Option<PathBuf> {
    if command.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(command);
        return path.exists().then_some(path);
    }

    let path_dirs = std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();
    let dirs = path_dirs
        .into_iter()
        .chain(SEARCH_PATHS.iter().map(PathBuf::from));

    let found = find_in_dirs(command, dirs);
    match &found {
        Some(path) => debug!("Found {} at {}", command, path.display()),
        None => debug!("Command {} not found", command),
    }
    found
}

fn find_in_dirs<I>(command: &str, dirs: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let names = [command.to_string(), format!("{command}.exe")];
    dirs.into_iter().find_map(|dir| {
        names
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| is_executable(candidate))
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
