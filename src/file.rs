//! File discovery and path resolution for the config file.
//!
//! # Discovery
//!
//! [`find_in_ancestors`] walks from a start directory toward the filesystem
//! root, checking `{dir}/{file_name}` at each level. The first regular file
//! found wins, so the directory closest to the start takes precedence over its
//! ancestors. The walk never descends into siblings or children.
//!
//! # Resolution
//!
//! [`resolve_target`] turns a user-supplied or discovered location into the
//! absolute path of the file itself: a location whose last component is not
//! the file name is treated as a directory and gets the file name appended;
//! relative locations are anchored at the working directory; `.` and `..`
//! components are folded away lexically.
//!
//! Missing files are reported as `None`. Only real I/O failures (permissions,
//! reading a directory, etc.) become errors.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

use crate::error::TreefigError;

/// Check that `name` is a bare file name, not a path.
pub fn validate_file_name(name: &str) -> Result<&str, TreefigError> {
    if name.is_empty() {
        return Err(TreefigError::FileNameNotConfigured);
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == OsStr::new(name) => Ok(name),
        _ => Err(TreefigError::InvalidFileName(name.to_string())),
    }
}

/// Walk from `start` up to the root, returning the nearest `{dir}/{file_name}`
/// that exists as a regular file.
pub fn find_in_ancestors(start: &Path, file_name: &str) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(file_name);
        trace!(path = %candidate.display(), "probing for config file");
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Resolve `location` to the absolute path of the config file.
pub fn resolve_target(location: &Path, working_dir: &Path, file_name: &str) -> PathBuf {
    let mut path = if location.is_absolute() {
        location.to_path_buf()
    } else {
        working_dir.join(location)
    };

    path = normalize(&path);
    if path.file_name() != Some(OsStr::new(file_name)) {
        path.push(file_name);
    }
    path
}

/// Resolve the directory searches and relative paths are anchored at.
///
/// `configured` overrides the process current directory; a relative override
/// is taken relative to it.
pub fn working_dir(configured: Option<&Path>) -> Result<PathBuf, TreefigError> {
    let cwd = || {
        std::env::current_dir().map_err(|e| TreefigError::IoError {
            path: PathBuf::from("."),
            source: e,
        })
    };

    let dir = match configured {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd()?.join(dir),
        None => cwd()?,
    };
    Ok(normalize(&dir))
}

/// Read the file at `path`, or `None` if it does not exist.
///
/// A path that runs through a regular file (`notes.txt/.myapp`) does not
/// exist either.
pub fn read_if_exists(path: &Path) -> Result<Option<String>, TreefigError> {
    use std::io::ErrorKind;

    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
        Err(e) => Err(TreefigError::IoError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Overwrite the file at `path`. The parent directory must already exist.
pub fn write(path: &Path, content: &str) -> Result<(), TreefigError> {
    std::fs::write(path, content).map_err(|e| TreefigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Lexically fold `.` and `..` components. Symlinks are not resolved.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
