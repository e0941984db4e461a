//! Second pass over a directory batch: short and long row rendering.

use crate::columns::write_columns;
use crate::entry::{DirEntry, EntryKind};
use crate::identity::IdentityResolver;
use crate::widths::ColumnWidths;
use crate::Layout;
use chrono::{DateTime, Local};
use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::time::SystemTime;

/// Timestamp layout of the long format: `Mon DD HH:MM`.
const MTIME_FORMAT: &str = "%b %d %H:%M";

/// Rendering options derived from the listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub long_listing: bool,
    pub layout: Layout,
}

/// Displays a file name with control characters escaped (`\n`, `\t`,
/// `\xNN`), so a name can neither break a row nor reach the terminal as a
/// control sequence.
#[derive(Debug, Clone, Copy)]
pub struct EscapedName<'a>(pub &'a str);

impl fmt::Display for EscapedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                // Every `Cc` code point is below U+00A0.
                c if c.is_control() => write!(f, "\\x{:02X}", u32::from(c))?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

/// Type glyph followed by the nine `rwx` permission characters.
pub fn permission_string(kind: EntryKind, mode: u32) -> String {
    const BITS: [(u32, char); 9] = [
        (0o400, 'r'),
        (0o200, 'w'),
        (0o100, 'x'),
        (0o040, 'r'),
        (0o020, 'w'),
        (0o010, 'x'),
        (0o004, 'r'),
        (0o002, 'w'),
        (0o001, 'x'),
    ];
    let mut out = String::with_capacity(10);
    out.push(kind.glyph());
    for (bit, ch) in BITS {
        out.push(if mode & bit != 0 { ch } else { '-' });
    }
    out
}

/// Format a modification time in local time.
pub fn format_mtime(mtime: SystemTime) -> String {
    DateTime::<Local>::from(mtime).format(MTIME_FORMAT).to_string()
}

/// Write the bare entry name. No metadata is consulted.
pub fn render_short_row<W: Write>(writer: &mut W, entry: &DirEntry) -> io::Result<()> {
    writeln!(writer, "{}", EscapedName(&entry.name))
}

/// Write one long-listing row, aligned to `widths`.
pub fn render_long_row<W: Write>(
    writer: &mut W,
    entry: &DirEntry,
    widths: &ColumnWidths,
    identity: &dyn IdentityResolver,
) -> io::Result<()> {
    let meta = &entry.meta;
    writeln!(
        writer,
        "{} {} {:>ow$} {:>gw$} {:>sw$} {} {}",
        permission_string(entry.kind, meta.mode),
        meta.link_count,
        identity.owner(meta.owner_id),
        identity.group(meta.group_id),
        meta.size_bytes,
        format_mtime(meta.mtime),
        EscapedName(&entry.name),
        ow = widths.owner_width,
        gw = widths.group_width,
        sw = widths.size_width,
    )
}

/// Render a measured batch. `widths` is only consulted in long form.
pub fn render_batch<W: Write>(
    writer: &mut W,
    entries: &[DirEntry],
    widths: &ColumnWidths,
    config: &RenderConfig,
    identity: &dyn IdentityResolver,
) -> io::Result<()> {
    if config.long_listing {
        for entry in entries {
            render_long_row(writer, entry, widths, identity)?;
        }
        return Ok(());
    }
    match config.layout {
        Layout::OnePerLine => {
            for entry in entries {
                render_short_row(writer, entry)?;
            }
            Ok(())
        }
        Layout::Columns { width } => {
            let names: Vec<String> = entries
                .iter()
                .map(|e| EscapedName(&e.name).to_string())
                .collect();
            write_columns(writer, &names, width)
        }
    }
}
