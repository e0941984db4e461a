#![forbid(unsafe_code)]
//! Writes shell completions and the man page for `lsl`.
//!
//! Usage: `generate-assets [OUT_DIR]` (default `dist`).

use clap::CommandFactory;
use clap_complete::{generate_to, Shell};
use clap_mangen::Man;
use lsl::cli::Args;
use std::fs;
use std::path::{Path, PathBuf};

const SHELLS: [Shell; 4] = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

fn write_completions(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(SHELLS.len());
    for shell in SHELLS {
        let mut cmd = Args::command();
        written.push(generate_to(shell, &mut cmd, lsl::PROGRAM, dir)?);
    }
    Ok(written)
}

fn write_man_page(dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let mut buffer = Vec::new();
    Man::new(Args::command()).render(&mut buffer)?;
    let page = dir.join(format!("{}.1", lsl::PROGRAM));
    fs::write(&page, buffer)?;
    Ok(page)
}

fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist"));

    let mut written = write_completions(&out_dir.join("completions"))?;
    written.push(write_man_page(&out_dir.join("man"))?);

    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
