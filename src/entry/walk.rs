use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{DirEntry, EntryKind, Listing, StatInfo};
use crate::error::ListError;

/// Stat a path argument itself. Symlinks are followed; a link whose target
/// cannot be resolved is described by its own metadata instead.
pub fn stat_path(path: &Path) -> Result<DirEntry, ListError> {
    let name = path.to_string_lossy().to_string();
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) => match fs::symlink_metadata(path) {
            Ok(link_meta) if link_meta.file_type().is_symlink() => {
                warn!(path = %path.display(), error = %err, "symlink target unavailable");
                link_meta
            }
            _ => return Err(ListError::from_io(path, err)),
        },
    };
    Ok(DirEntry::new(
        name,
        path.to_path_buf(),
        EntryKind::from_file_type(meta.file_type()),
        StatInfo::from_metadata(&meta),
    ))
}

/// List the immediate children of `dir`, sorted by name.
///
/// The walkdir iterator lives only for the duration of this call, so the
/// directory handle is closed before returning on every path.
pub fn read_children(dir: &Path, include_self: bool) -> Result<Listing, ListError> {
    let walker = WalkDir::new(dir)
        .min_depth(0)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));

    let mut listing = Listing::default();
    let mut self_entry: Option<DirEntry> = None;

    for entry_result in walker {
        match entry_result {
            Ok(entry) if entry.depth() == 0 => {
                if !entry.file_type().is_dir() {
                    return Err(ListError::NotADirectory {
                        path: dir.to_path_buf(),
                    });
                }
                if include_self {
                    let meta = entry
                        .metadata()
                        .map_err(|e| ListError::from_walkdir(dir, e))?;
                    self_entry = Some(DirEntry {
                        is_self: true,
                        ..DirEntry::new(
                            ".",
                            entry.path().to_path_buf(),
                            EntryKind::Directory,
                            StatInfo::from_metadata(&meta),
                        )
                    });
                }
            }
            Ok(entry) => match entry.metadata() {
                Ok(meta) => listing.entries.push(child_entry(entry.path(), &meta)),
                Err(err) => unresolved_child(entry.path(), err, &mut listing),
            },
            Err(err) => {
                // An error about the directory itself ends this listing;
                // errors about a child only affect that child.
                let child = err.path().filter(|p| *p != dir).map(Path::to_path_buf);
                match child {
                    Some(child) if err.loop_ancestor().is_some() => {
                        linked_ancestor(&child, err, &mut listing)
                    }
                    Some(child) => unresolved_child(&child, err, &mut listing),
                    None => return Err(ListError::from_walkdir(dir, err)),
                }
            }
        }
    }

    if let Some(dot) = self_entry {
        let at = listing.entries.partition_point(|e| e.name.as_str() < ".");
        listing.entries.insert(at, dot);
    }

    debug!(
        dir = %dir.display(),
        count = listing.entries.len(),
        problems = listing.problems.len(),
        "read directory"
    );
    Ok(listing)
}

fn child_entry(child: &Path, meta: &fs::Metadata) -> DirEntry {
    let name = child
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| child.to_string_lossy().to_string());
    DirEntry::new(
        name,
        PathBuf::from(child),
        EntryKind::from_file_type(meta.file_type()),
        StatInfo::from_metadata(meta),
    )
}

/// A link to the listed directory (or one of its ancestors) trips walkdir's
/// cycle guard. Nothing below depth 1 is visited, so it is listed as the
/// directory it points to.
fn linked_ancestor(child: &Path, err: walkdir::Error, listing: &mut Listing) {
    match fs::metadata(child) {
        Ok(meta) => {
            debug!(path = %child.display(), "link to an ancestor directory");
            listing.entries.push(child_entry(child, &meta));
        }
        Err(_) => unresolved_child(child, err, listing),
    }
}

/// A child whose link target could not be followed is listed from its own
/// `lstat` metadata. A dangling link is only logged; any other failure
/// (`ELOOP`, an unreadable target) is recorded as a problem for the caller
/// to report. A child that cannot be stat-ed at all (e.g. removed since the
/// directory was read) is dropped.
fn unresolved_child(child: &Path, err: walkdir::Error, listing: &mut Listing) {
    let link_meta = match fs::symlink_metadata(child) {
        Ok(meta) => meta,
        Err(lstat_err) => {
            warn!(path = %child.display(), error = %lstat_err, "skipping entry");
            return;
        }
    };
    match ListError::from_walkdir(child, err) {
        ListError::NotFound { .. } => {
            warn!(path = %child.display(), "dangling symlink, listing the link itself");
        }
        problem => {
            warn!(error = %problem, "could not follow symlink, listing the link itself");
            listing.problems.push(problem);
        }
    }
    listing.entries.push(child_entry(child, &link_meta));
}
