//! Directory entries, their stat snapshots, and the source that enumerates them.

pub(crate) mod walk;

use crate::error::ListError;
use std::fs::{FileType, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub use walk::{read_children, stat_path};

/// File type of an entry, as reported by a logical (link-following) stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Regular,
    Symlink,
    Block,
    Char,
    Fifo,
    Socket,
    Unknown,
}

impl EntryKind {
    /// Map a `FileType` onto the kinds a listing distinguishes.
    pub fn from_file_type(ft: FileType) -> Self {
        if ft.is_dir() {
            return EntryKind::Directory;
        }
        if ft.is_file() {
            return EntryKind::Regular;
        }
        if ft.is_symlink() {
            return EntryKind::Symlink;
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if ft.is_block_device() {
                return EntryKind::Block;
            }
            if ft.is_char_device() {
                return EntryKind::Char;
            }
            if ft.is_fifo() {
                return EntryKind::Fifo;
            }
            if ft.is_socket() {
                return EntryKind::Socket;
            }
        }
        EntryKind::Unknown
    }

    /// The leading glyph of a long-listing permission string.
    pub fn glyph(self) -> char {
        match self {
            EntryKind::Directory => 'd',
            EntryKind::Block => 'b',
            EntryKind::Char => 'c',
            EntryKind::Fifo => 'p',
            EntryKind::Symlink => 'l',
            EntryKind::Regular => '-',
            EntryKind::Socket => 's',
            EntryKind::Unknown => '?',
        }
    }
}

/// Immutable snapshot of an entry's metadata, taken at traversal time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatInfo {
    /// Size in bytes.
    pub size_bytes: u64,
    /// Allocated blocks in 512-byte units.
    pub blocks512: u64,
    /// Hard link count.
    pub link_count: u64,
    pub owner_id: u32,
    pub group_id: u32,
    /// Last modification time.
    pub mtime: SystemTime,
    /// Permission bits (`0o777` mask only; the type lives in `EntryKind`).
    pub mode: u32,
}

impl StatInfo {
    #[cfg(unix)]
    pub fn from_metadata(meta: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        StatInfo {
            size_bytes: meta.size(),
            blocks512: meta.blocks(),
            link_count: meta.nlink(),
            owner_id: meta.uid(),
            group_id: meta.gid(),
            mtime: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            mode: meta.mode() & 0o777,
        }
    }

    #[cfg(not(unix))]
    pub fn from_metadata(meta: &Metadata) -> Self {
        let mode = if meta.permissions().readonly() { 0o444 } else { 0o666 };
        StatInfo {
            size_bytes: meta.len(),
            blocks512: meta.len().div_ceil(512),
            link_count: 1,
            owner_id: 0,
            group_id: 0,
            mtime: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            mode,
        }
    }
}

/// A single listed entry: a child of a directory, the directory's own `.`
/// entry, or a non-directory path argument.
#[derive(Debug, Clone, PartialEq)]
pub struct DirEntry {
    /// Display name (file name for children, the argument text for singletons).
    pub name: String,
    /// Full filesystem path.
    pub path: PathBuf,
    pub kind: EntryKind,
    pub meta: StatInfo,
    /// Whether this is the synthetic `.` entry for the listed directory itself.
    pub is_self: bool,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, path: PathBuf, kind: EntryKind, meta: StatInfo) -> Self {
        DirEntry {
            name: name.into(),
            path,
            kind,
            meta,
            is_self: false,
        }
    }

    /// Dotfile check.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Only `.` is ever synthesized; `..` is never produced.
    pub fn is_dot_or_dot_dot(&self) -> bool {
        self.is_self
    }

    /// Whether the entry should be left out of a listing that does not
    /// request hidden entries.
    pub fn is_filtered(&self, show_all: bool) -> bool {
        !show_all && (self.is_hidden() || self.is_dot_or_dot_dot())
    }
}

/// The children of one directory, plus the children that could not be
/// resolved cleanly.
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<DirEntry>,
    /// Per-child failures worth reporting (a link loop, an unreadable link
    /// target). The child itself is still in `entries` when its own
    /// metadata could be read.
    pub problems: Vec<ListError>,
}

impl Listing {
    pub fn new(entries: Vec<DirEntry>) -> Self {
        Listing {
            entries,
            problems: Vec::new(),
        }
    }
}

/// Abstraction over entry enumeration so it can be swapped or mocked.
pub trait EntrySource {
    /// Stat `path` itself, following symlinks.
    fn stat_path(&self, path: &Path) -> Result<DirEntry, ListError>;

    /// Immediate children of `dir` in byte-lexicographic name order, with
    /// the synthetic `.` entry included when `include_self` is set.
    fn read_children(&self, dir: &Path, include_self: bool) -> Result<Listing, ListError>;
}

/// Default `EntrySource` that delegates to the walkdir-based implementation.
pub struct WalkdirSource;

impl EntrySource for WalkdirSource {
    fn stat_path(&self, path: &Path) -> Result<DirEntry, ListError> {
        stat_path(path)
    }

    fn read_children(&self, dir: &Path, include_self: bool) -> Result<Listing, ListError> {
        read_children(dir, include_self)
    }
}
