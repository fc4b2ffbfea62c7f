//! Capability-based UTF-8 file helpers shared by the Waypoint binaries.
//!
//! Every helper resolves an ambient directory handle once and performs the
//! remaining IO relative to it through `cap-std`.
#![forbid(unsafe_code)]

use std::io;
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open an existing file for reading.
///
/// # Errors
///
/// Propagates the underlying IO error, including `NotFound`.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Whether `path` names a regular file.
///
/// # Errors
///
/// Returns `NotFound` when the path or its parent directory is missing.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = parent_and_name(path)?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Create (or truncate) a file for writing, creating missing parent
/// directories first.
///
/// # Errors
///
/// Fails when `path` has no file name or any directory cannot be created.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = parent_and_name(path)?;
    dir.create(name)
}

/// Create every missing ancestor directory of `path`.
///
/// # Errors
///
/// Propagates directory creation failures.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) else {
        return Ok(());
    };
    let (base, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(relative)
}

/// Open the directory containing `path` and return it with the file name.
fn parent_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?;
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `dir` into an ambient anchor (root, drive prefix or the current
/// directory) and the path beneath it.
fn split_anchor(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut components = dir.as_std_path().components();
    let anchor = match components.next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            // The root separator, when present, follows the prefix.
            if let Some(Component::RootDir) = components.clone().next() {
                components.next();
            }
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => {
            components = dir.as_std_path().components();
            Utf8PathBuf::from(".")
        }
    };

    let relative = Utf8PathBuf::from_path_buf(components.as_path().to_path_buf())
        .map_err(|_| io::Error::other("non-UTF-8 directory path"))?;
    let base = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((base, relative))
}
