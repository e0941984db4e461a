//! Top-level loop over the requested paths.
//!
//! Every argument is resolved before anything is printed; an unresolvable
//! argument aborts the whole run. Directories are then listed one at a
//! time: the visible batch is materialised once, measured, and rendered
//! from the same slice. A directory that fails mid-listing is reported and
//! skipped while the remaining paths are still listed.

use crate::entry::{DirEntry, EntryKind, EntrySource, Listing};
use crate::error::ListError;
use crate::identity::IdentityResolver;
use crate::render::{render_batch, RenderConfig};
use crate::widths::{compute_widths, ColumnWidths};
use crate::{ListingRequest, PROGRAM};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Result of a listing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    /// Every path was listed.
    Success,
    /// At least one directory could not be read; the others were listed.
    Partial,
    /// A path argument could not be resolved; nothing was listed.
    Aborted,
}

impl ListStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            ListStatus::Success => 0,
            ListStatus::Partial => 1,
            ListStatus::Aborted => 2,
        }
    }
}

/// Kind of the most recently emitted block, for blank-line separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Singleton,
    Directory,
}

/// Whether a child path would be hidden from a listing without `-a`.
fn is_hidden_path(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// Drives the listing of every requested path.
pub struct Dispatcher<'a> {
    request: &'a ListingRequest,
    source: &'a dyn EntrySource,
    identity: &'a dyn IdentityResolver,
    render: RenderConfig,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        request: &'a ListingRequest,
        source: &'a dyn EntrySource,
        identity: &'a dyn IdentityResolver,
    ) -> Self {
        Self {
            request,
            source,
            identity,
            render: RenderConfig {
                long_listing: request.long_listing,
                layout: request.layout,
            },
        }
    }

    /// List every path, writing rows to `out` and diagnostics to `err`.
    /// Only write failures are returned as errors.
    pub fn run<W: Write, E: Write>(&self, out: &mut W, err: &mut E) -> io::Result<ListStatus> {
        let Some(targets) = self.resolve_all(err)? else {
            return Ok(ListStatus::Aborted);
        };

        let mut status = ListStatus::Success;
        let mut previous: Option<Block> = None;
        let mut singletons: Vec<DirEntry> = Vec::new();

        for target in targets {
            if target.kind != EntryKind::Directory {
                singletons.push(target);
                continue;
            }
            if !singletons.is_empty() {
                self.emit_singletons(out, &singletons, previous)?;
                singletons.clear();
                previous = Some(Block::Singleton);
            }
            let block = self.list_directory(out, err, &target.path, previous, &mut status)?;
            if block.is_some() {
                previous = block;
            }
        }
        if !singletons.is_empty() {
            self.emit_singletons(out, &singletons, previous)?;
        }
        Ok(status)
    }

    /// Stat every argument. Returns `None` after reporting each failure.
    fn resolve_all<E: Write>(&self, err: &mut E) -> io::Result<Option<Vec<DirEntry>>> {
        let mut targets = Vec::with_capacity(self.request.paths.len());
        let mut failed = false;
        for path in &self.request.paths {
            match self.source.stat_path(path) {
                Ok(entry) => targets.push(entry),
                Err(e) => {
                    writeln!(err, "{PROGRAM}: {e}")?;
                    failed = true;
                }
            }
        }
        Ok(if failed { None } else { Some(targets) })
    }

    /// A run of consecutive non-directory arguments. Long rows are each
    /// measured against themselves only; short names share one layout so
    /// `-C` can pack them into columns.
    fn emit_singletons<W: Write>(
        &self,
        out: &mut W,
        batch: &[DirEntry],
        previous: Option<Block>,
    ) -> io::Result<()> {
        if previous == Some(Block::Directory) {
            writeln!(out)?;
        }
        debug!(count = batch.len(), "listing single entries");
        if !self.request.long_listing {
            return render_batch(out, batch, &ColumnWidths::default(), &self.render, self.identity);
        }
        for entry in batch {
            let own = std::slice::from_ref(entry);
            let widths = self.measure(own);
            render_batch(out, own, &widths, &self.render, self.identity)?;
        }
        Ok(())
    }

    /// Returns the block that was emitted, or `None` if the directory could
    /// not be read and was skipped. Any reported failure downgrades `status`.
    fn list_directory<W: Write, E: Write>(
        &self,
        out: &mut W,
        err: &mut E,
        dir: &Path,
        previous: Option<Block>,
        status: &mut ListStatus,
    ) -> io::Result<Option<Block>> {
        let listing = match self.source.read_children(dir, self.request.show_all) {
            Ok(listing) => listing,
            Err(ListError::NotADirectory { .. }) => {
                // Replaced by a non-directory since it was resolved.
                return match self.source.stat_path(dir) {
                    Ok(entry) => {
                        self.emit_singletons(out, std::slice::from_ref(&entry), previous)?;
                        Ok(Some(Block::Singleton))
                    }
                    Err(e) => {
                        writeln!(err, "{PROGRAM}: {e}")?;
                        *status = ListStatus::Partial;
                        Ok(None)
                    }
                };
            }
            Err(e) => {
                writeln!(err, "{PROGRAM}: {e}")?;
                *status = ListStatus::Partial;
                return Ok(None);
            }
        };

        let Listing {
            mut entries,
            problems,
        } = listing;
        let show_all = self.request.show_all;
        for problem in problems.iter().filter(|p| show_all || !is_hidden_path(p.path())) {
            writeln!(err, "{PROGRAM}: {problem}")?;
            *status = ListStatus::Partial;
        }

        entries.retain(|e| !e.is_filtered(show_all));
        debug!(dir = %dir.display(), visible = entries.len(), "listing directory");

        if previous.is_some() {
            writeln!(out)?;
        }
        if self.request.shows_headers() {
            writeln!(out, "{}:", dir.display())?;
        }

        let widths = self.measure(&entries);
        if self.request.long_listing {
            writeln!(out, "total {}", widths.total_blocks)?;
        }
        render_batch(out, &entries, &widths, &self.render, self.identity)?;
        Ok(Some(Block::Directory))
    }

    /// Width pass; skipped for short listings, which never look at metadata.
    fn measure(&self, batch: &[DirEntry]) -> ColumnWidths {
        if self.request.long_listing {
            compute_widths(batch, self.identity)
        } else {
            ColumnWidths::default()
        }
    }
}
