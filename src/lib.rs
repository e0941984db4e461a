#![forbid(unsafe_code)]
//! Directory listing with aligned long-format output.
//!
//! A listing runs in two passes per directory: the visible entries are
//! collected once, measured for column widths and block totals, then
//! rendered from the same batch.

pub mod cli;
pub mod columns;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod identity;
pub mod logging;
pub mod render;
mod request;
pub mod terminal;
pub mod widths;

pub use request::{Layout, ListingRequest};

/// Name used as the prefix of diagnostics.
pub const PROGRAM: &str = "lsl";
