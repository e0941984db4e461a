#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use lsl::cli::Args;
use lsl::dispatch::Dispatcher;
use lsl::entry::WalkdirSource;
use lsl::identity::SystemIdentity;
use lsl::{logging, terminal, PROGRAM};
use std::io::{self, Write};

fn main() {
    match run_app() {
        Ok(code) => std::process::exit(code),
        Err(e) if is_broken_pipe(&e) => std::process::exit(0),
        Err(e) => {
            eprintln!("{PROGRAM}: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run_app() -> Result<i32> {
    let args = Args::parse().validated();
    logging::init(args.verbose);

    let request = args.into_request(terminal::terminal_width());
    tracing::debug!(?request, "parsed request");

    let identity = SystemIdentity::new();
    let dispatcher = Dispatcher::new(&request, &WalkdirSource, &identity);

    let mut out = terminal::buffered_stdout();
    let mut err = io::stderr().lock();
    let status = dispatcher
        .run(&mut out, &mut err)
        .context("failed to write listing")?;
    out.flush().context("failed to write listing")?;
    Ok(status.exit_code())
}

/// A closed pipe downstream (`lsl | head`) ends the run quietly.
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
}
