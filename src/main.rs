use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use eframe::egui;

use rusty_shutter::app::RustyShutterApp;
use rusty_shutter::config::WINDOW_SIZE;
use rusty_shutter::data::loader::{harvest_dir_with, HarvestOptions};
use rusty_shutter::data::model::ExifDataset;
use rusty_shutter::export::save_report;
use rusty_shutter::report::Report;
use rusty_shutter::state::AppState;

/// Plot the most used EXIF parameters of the RAW photos in a directory.
#[derive(Debug, Parser)]
#[command(name = "rusty-shutter", version)]
struct Cli {
    /// A directory containing image files
    dir: PathBuf,

    /// Write the figure to this file (.png, .csv or .json) instead of
    /// opening a window
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Log and skip files that cannot be read instead of stopping
    #[arg(long)]
    skip_unreadable: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = parse_arguments();

    let summary = harvest_dir_with(
        &cli.dir,
        HarvestOptions {
            skip_unreadable: cli.skip_unreadable,
        },
    )
    .with_context(|| format!("harvesting {}", cli.dir.display()))?;

    let skipped = summary.skipped.len();
    let dataset = ExifDataset::from_records(summary.records);
    let report = Report::build(&dataset).context("building count plots")?;

    if let Some(path) = &cli.output {
        return save_report(&report, path)
            .with_context(|| format!("writing {}", path.display()));
    }

    let state = AppState::new(report, cli.dir.clone(), skipped);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Shutter – Camera Settings",
        options,
        Box::new(|_cc| Ok(Box::new(RustyShutterApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

/// Parse the command line, warning about (and otherwise ignoring) arguments
/// the tool does not know.
fn parse_arguments() -> Cli {
    let mut cmd = Cli::command();
    cmd.build();

    let (known, unknown) = partition_args(&cmd, std::env::args_os().collect());
    if !unknown.is_empty() {
        log::warn!("ignoring unknown arguments {unknown:?}");
        println!("Unknown argument(s): {unknown:?}");
        if let Err(e) = cmd.print_help() {
            log::warn!("cannot print help: {e}");
        }
        println!();
    }

    cmd.try_get_matches_from_mut(known)
        .and_then(|matches| Cli::from_arg_matches(&matches))
        .unwrap_or_else(|e| e.exit())
}

/// How one command line argument is treated.
enum ArgKind {
    /// `--`: everything after it is positional.
    Separator,
    /// A declared option; `takes_next` when its value is the next argument.
    Known { takes_next: bool },
    Unknown,
    Positional,
}

/// Split `args` (program name first) into those `cmd` accepts and the rest.
///
/// Unknown flags and positionals beyond the declared ones are unknown. A
/// value following a known option that takes one stays with it. Arguments
/// that are not valid UTF-8 can only be positionals.
fn partition_args(cmd: &clap::Command, args: Vec<OsString>) -> (Vec<OsString>, Vec<OsString>) {
    let takes_value = |arg: &clap::Arg| arg.get_action().takes_values();
    let by_long = |name: &str| cmd.get_arguments().find(|a| a.get_long() == Some(name));
    let by_short = |c: char| cmd.get_arguments().find(|a| a.get_short() == Some(c));
    let positionals = cmd.get_positionals().count();

    let long_kind = |long: &str| {
        let (name, inline_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        match by_long(name) {
            Some(a) => ArgKind::Known {
                takes_next: takes_value(a) && !inline_value,
            },
            None => ArgKind::Unknown,
        }
    };
    let short_kind = |shorts: &str| match shorts.chars().next().and_then(by_short) {
        Some(a) if takes_value(a) => ArgKind::Known {
            takes_next: shorts.chars().count() == 1,
        },
        Some(_)
            if shorts
                .chars()
                .all(|c| by_short(c).is_some_and(|a| !takes_value(a))) =>
        {
            ArgKind::Known { takes_next: false }
        }
        _ => ArgKind::Unknown,
    };

    let mut known = Vec::new();
    let mut unknown = Vec::new();
    let mut seen_positionals = 0;
    let mut only_positionals = false;

    let mut args = args.into_iter();
    known.extend(args.next());

    while let Some(arg) = args.next() {
        let kind = match arg.to_str() {
            _ if only_positionals => ArgKind::Positional,
            Some("--") => ArgKind::Separator,
            Some(text) if text.starts_with("--") => long_kind(&text[2..]),
            Some(text) if text.len() > 1 && text.starts_with('-') => short_kind(&text[1..]),
            _ => ArgKind::Positional,
        };

        match kind {
            ArgKind::Separator => {
                only_positionals = true;
                known.push(arg);
            }
            ArgKind::Known { takes_next } => {
                known.push(arg);
                if takes_next {
                    known.extend(args.next());
                }
            }
            ArgKind::Unknown => unknown.push(arg),
            ArgKind::Positional if seen_positionals < positionals => {
                seen_positionals += 1;
                known.push(arg);
            }
            ArgKind::Positional => unknown.push(arg),
        }
    }

    (known, unknown)
}
