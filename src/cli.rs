use crate::{Layout, ListingRequest};
use clap::Parser;
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Examples:
  lsl                 List the current directory
  lsl -l /etc         Long listing of /etc
  lsl -la ~           Long listing including dotfiles and '.'
  lsl -C src tests    Column layout, one block per directory
  lsl -l Cargo.toml   A single file's row";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "lsl",
    version,
    about = "List directory contents",
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Files or directories to list (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Use the long listing format
    #[arg(short = 'l', long = "long")]
    pub long_listing: bool,

    /// Show hidden entries, including '.'
    #[arg(short = 'a', long = "all")]
    pub show_all: bool,

    /// One entry per line (default)
    #[arg(short = '1', overrides_with = "columns")]
    pub one_per_line: bool,

    /// List entries in columns sized to the terminal
    #[arg(short = 'C', overrides_with = "one_per_line")]
    pub columns: bool,

    /// Increase diagnostic output on stderr (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        // The long format is always one row per entry.
        if self.long_listing {
            self.columns = false;
        }
        self
    }

    /// Freeze the parsed flags into a request. `terminal_width` is only
    /// used by the column layout.
    pub fn into_request(self, terminal_width: usize) -> ListingRequest {
        let layout = if self.columns {
            Layout::Columns {
                width: terminal_width,
            }
        } else {
            Layout::OnePerLine
        };
        ListingRequest {
            layout,
            show_all: self.show_all,
            long_listing: self.long_listing,
            ..ListingRequest::new(self.paths)
        }
    }
}
