#![allow(dead_code)]

use lsl::dispatch::{Dispatcher, ListStatus};
use lsl::entry::{DirEntry, EntryKind, EntrySource, Listing, StatInfo};
use lsl::error::ListError;
use lsl::identity::IdentityResolver;
use lsl::ListingRequest;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Write a file of exactly `size` bytes.
pub fn write_sized(dir: &Path, name: &str, size: usize) {
    fs::write(dir.join(name), vec![b'x'; size]).unwrap();
}

/// Identity resolver with a fixed table; unknown ids print as numbers.
pub struct FixedIdentity {
    pub users: HashMap<u32, String>,
    pub groups: HashMap<u32, String>,
}

impl FixedIdentity {
    pub fn new(users: &[(u32, &str)], groups: &[(u32, &str)]) -> Self {
        Self {
            users: users.iter().map(|(id, n)| (*id, n.to_string())).collect(),
            groups: groups.iter().map(|(id, n)| (*id, n.to_string())).collect(),
        }
    }
}

impl IdentityResolver for FixedIdentity {
    fn owner(&self, uid: u32) -> String {
        self.users.get(&uid).cloned().unwrap_or_else(|| uid.to_string())
    }

    fn group(&self, gid: u32) -> String {
        self.groups.get(&gid).cloned().unwrap_or_else(|| gid.to_string())
    }
}

/// A fixed mtime so rows can be compared against `format_mtime` output.
pub fn fixed_mtime() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

/// Create a DirEntry for testing purposes.
pub fn make_entry(name: &str, kind: EntryKind, size: u64, blocks512: u64, uid: u32, gid: u32) -> DirEntry {
    DirEntry::new(
        name,
        PathBuf::from(format!("/tmp/test/{}", name)),
        kind,
        StatInfo {
            size_bytes: size,
            blocks512,
            link_count: 1,
            owner_id: uid,
            group_id: gid,
            mtime: fixed_mtime(),
            mode: 0o644,
        },
    )
}

/// In-memory source serving one directory listing per path.
pub struct MemorySource {
    pub dirs: HashMap<PathBuf, Vec<DirEntry>>,
}

impl MemorySource {
    pub fn single(dir: &str, children: Vec<DirEntry>) -> Self {
        let mut dirs = HashMap::new();
        dirs.insert(PathBuf::from(dir), children);
        Self { dirs }
    }
}

impl EntrySource for MemorySource {
    fn stat_path(&self, path: &Path) -> Result<DirEntry, ListError> {
        if self.dirs.contains_key(path) {
            let mut dir = make_entry(&path.to_string_lossy(), EntryKind::Directory, 4096, 8, 0, 0);
            dir.path = path.to_path_buf();
            return Ok(dir);
        }
        Err(ListError::NotFound {
            path: path.to_path_buf(),
        })
    }

    fn read_children(&self, dir: &Path, include_self: bool) -> Result<Listing, ListError> {
        let mut children = self.dirs.get(dir).cloned().ok_or_else(|| ListError::NotFound {
            path: dir.to_path_buf(),
        })?;
        if include_self {
            let mut dot = make_entry(".", EntryKind::Directory, 4096, 8, 0, 0);
            dot.is_self = true;
            children.insert(0, dot);
        }
        Ok(Listing::new(children))
    }
}

/// Run a request to completion, returning stdout, stderr, and the status.
pub fn run_listing(
    request: &ListingRequest,
    source: &dyn EntrySource,
    identity: &dyn IdentityResolver,
) -> (String, String, ListStatus) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let status = Dispatcher::new(request, source, identity)
        .run(&mut out, &mut err)
        .unwrap();
    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
        status,
    )
}

/// Whether the current process ignores permission bits (e.g. running as root).
#[cfg(unix)]
pub fn permissions_are_bypassed() -> bool {
    use std::os::unix::fs::PermissionsExt;
    let tmp = TempDir::new().unwrap();
    let canary = tmp.path().join("canary");
    fs::create_dir(&canary).unwrap();
    fs::set_permissions(&canary, fs::Permissions::from_mode(0o000)).unwrap();
    let readable = fs::read_dir(&canary).is_ok();
    fs::set_permissions(&canary, fs::Permissions::from_mode(0o755)).unwrap();
    readable
}
