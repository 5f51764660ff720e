//! Filesystem discovery for configured log files.
//!
//! Matches files under the log directory against the resolved handler file
//! names. Rotated variants share the original name as a prefix
//! (`server.log.1`, `server.log-2024-01-01`), so the match rule is
//! exact-or-prefix on the path relative to the log directory. Only files
//! that are readable right now count; a file mid-rotation or locked down
//! by ACLs is treated as not present.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// True if `path` is an existing regular file that can be opened for
/// reading.
pub fn is_readable_file(path: &Path) -> bool {
    path.is_file() && fs::File::open(path).is_ok()
}

/// True if `relative` names the configured file `name` or a rotated
/// variant of it.
fn matches_name(relative: &str, name: &str) -> bool {
    relative == name || relative.starts_with(name)
}

/// Find every readable file under `log_dir` matching one of `names`.
///
/// Returns paths relative to `log_dir`, deduplicated and sorted. An unset
/// `log_dir` yields an empty set without error. When `recursive` is false
/// only the top-level directory is inspected; otherwise the whole subtree
/// is walked.
///
/// I/O failures during the walk propagate to the caller; the overlay
/// catches them at its boundary and degrades to "no files found".
pub fn find_files(
    log_dir: Option<&Path>,
    names: &HashSet<String>,
    recursive: bool,
) -> io::Result<BTreeSet<PathBuf>> {
    let mut found = BTreeSet::new();
    let Some(dir) = log_dir else {
        return Ok(found);
    };

    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                if recursive {
                    stack.push(path);
                }
                continue;
            }
            let relative = path
                .strip_prefix(dir)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| path.clone());
            let resource_name = relative.to_string_lossy();
            for name in names {
                // First match wins; the outcome is the same whichever
                // configured name matched.
                if matches_name(&resource_name, name) && is_readable_file(&path) {
                    found.insert(relative);
                    break;
                }
            }
        }
    }
    Ok(found)
}

/// Single-name probe: does `candidate` name a readable configured file or
/// rotated variant?
///
/// No directory walk happens here; the candidate path is tested directly.
pub fn has_readable_file(
    log_dir: Option<&Path>,
    names: &HashSet<String>,
    candidate: &str,
) -> bool {
    let Some(dir) = log_dir else {
        return false;
    };
    for name in names {
        if matches_name(candidate, name) {
            return is_readable_file(&dir.join(candidate));
        }
    }
    false
}

/// True if any configured name has at least one readable file on disk.
///
/// Checks each name's direct candidate first and only falls back to a
/// subtree walk for rotated variants when the direct file is absent,
/// stopping at the first hit. Walk failures are reported to the diagnostic
/// sink and that name is treated as absent.
pub fn any_file_exists(log_dir: Option<&Path>, names: &HashSet<String>) -> bool {
    let Some(dir) = log_dir else {
        return false;
    };
    for name in names {
        if is_readable_file(&dir.join(name)) {
            return true;
        }
        match find_rotated(dir, name) {
            Ok(true) => return true,
            Ok(false) => {}
            Err(err) => {
                tracing::error!(%err, %name, "failed scanning for rotated log files");
            }
        }
    }
    false
}

/// Walk the subtree looking for the first readable rotated variant of
/// `name`.
fn find_rotated(dir: &Path, name: &str) -> io::Result<bool> {
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                stack.push(path);
                continue;
            }
            let relative = path
                .strip_prefix(dir)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| path.clone());
            if matches_name(&relative.to_string_lossy(), name) && is_readable_file(&path) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
