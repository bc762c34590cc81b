// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::{
    collect::{CollectionState, RunOutcome, RunStatus, collect_all},
    config::options::{ExportFormat, ExportOptions},
    file,
    host::SnapshotDir,
    progress::Progress,
    store::{DiskStore, Store},
};

#[derive(Default)]
struct CliOptions {
    collect_dir: Option<PathBuf>,
    export: bool,
    out: Option<String>,
    format: Option<ExportFormat>,
    no_headers: bool,
    show: bool,
    clear: bool,
}

/// Prints one line per round, like the GUI status bar.
struct CliProgress;

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn round_done(&mut self, round: u32, found: usize, total: usize) {
        println!("Round {round}: {found} posts visible, {total} in vault");
    }
    fn finish(&mut self, outcome: &RunOutcome) {
        match outcome.status {
            RunStatus::Completed => {
                println!("Done: {} posts in vault", outcome.total_persisted)
            }
            RunStatus::Cancelled => {
                println!("Stopped: {} posts kept", outcome.total_persisted)
            }
            _ => {}
        }
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let opts = parse_cli()?;

    if opts.clear {
        DiskStore::default().clear()?;
        println!("Vault cleared");
        return Ok(());
    }

    if let Some(dir) = &opts.collect_dir {
        let mut host = SnapshotDir::open(dir)?;
        println!("Collecting from {} ({} snapshots)", dir.display(), host.file_count());

        let store = DiskStore::default();
        let mut state = CollectionState::new();
        let mut prog = CliProgress;
        let outcome = collect_all(&mut host, &store, &mut state, Some(&mut prog));
        if outcome.status == RunStatus::Failed {
            return Err(outcome.error.unwrap_or_else(|| s!("collection failed")).into());
        }
    }

    if opts.export || opts.out.is_some() {
        let mut export = ExportOptions::default();
        if let Some(fmt) = opts.format {
            export.format = fmt;
        }
        if let Some(out) = &opts.out {
            export.set_path(out);
        }
        export.include_headers = !opts.no_headers;

        let collection = DiskStore::default().load()?;
        if collection.is_empty() {
            println!("Vault is empty, nothing to export");
        } else {
            let path = file::write_export(&export, &collection.posts)?;
            println!("Exported {} posts → {}", collection.len(), path.display());
        }
    }

    if opts.show {
        let collection = DiskStore::default().load()?;
        println!("Vault: {} posts", collection.len());
        if collection.saved_at_unix > 0 {
            println!("Last merge: {} (unix)", collection.saved_at_unix);
        }
    }

    Ok(())
}

fn parse_cli() -> Result<CliOptions, Box<dyn Error>> {
    let mut opts = CliOptions::default();
    let mut any = false;

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        any = true;
        match a.as_str() {
            "-d" | "--dir" => {
                let v = args.next().ok_or("Missing value for --dir")?;
                opts.collect_dir = Some(PathBuf::from(v));
            }
            "-e" | "--export" => opts.export = true,
            "-o" | "--out" => {
                opts.out = Some(args.next().ok_or("Missing value for --out")?);
            }
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                opts.format = Some(match v.to_ascii_lowercase().as_str() {
                    "json" => ExportFormat::Json,
                    "csv" => ExportFormat::Csv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                });
            }
            "--no-headers" => opts.no_headers = true,
            "--show" => opts.show = true,
            "--clear" => opts.clear = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if !any {
        return Err("No arguments. Try --help".into());
    }
    Ok(opts)
}
