//! Interactive terminal front end for the traversal player.
//!
//! Reads one command per line from stdin; `help` lists them. Highlights are
//! printed as they fire, so traversals started back to back interleave.

mod app;
mod canvas;
mod menu;
mod ui;

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use std::env;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::time::Duration;

use traversal::playback::{OverlapPolicy, PlaybackOptions};
use traversal::tree::Tree;

use app::{Flow, VisualizerApp};
use canvas::TerminalCanvas;
use menu::Command;

const USAGE: &str = "\
usage: tree-visualizer [--step-ms <ms>] [--bfs-ms <ms>] [--flash-ms <ms>]
                       [--cancel-previous] [--seed <n>]";

/// Settings taken from the command line
#[derive(Debug, Default, PartialEq)]
struct Args {
    options: PlaybackOptions,
    seed: Option<u64>,
}

fn millis(flag: &str, value: Option<String>) -> Result<Duration> {
    let value = value.ok_or_else(|| anyhow!("{flag} expects a value in milliseconds"))?;
    let ms = value
        .parse::<u64>()
        .with_context(|| format!("Invalid value {value:?} for {flag}"))?;
    Ok(Duration::from_millis(ms))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--step-ms" => {
                parsed.options = parsed.options.step_delay(millis(&arg, args.next())?);
            }
            "--bfs-ms" => {
                parsed.options = parsed.options.bfs_delay(millis(&arg, args.next())?);
            }
            "--flash-ms" => {
                parsed.options = parsed.options.flash(millis(&arg, args.next())?);
            }
            "--cancel-previous" => {
                parsed.options = parsed.options.overlap(OverlapPolicy::CancelPrevious);
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("--seed expects a number"))?;
                let seed = value
                    .parse::<u64>()
                    .with_context(|| format!("Invalid seed {value:?}"))?;
                parsed.seed = Some(seed);
            }
            other => bail!("Unknown argument {other:?}\n{USAGE}"),
        }
    }

    Ok(parsed)
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        println!("{USAGE}");
        return Ok(());
    }
    let Args { options, seed } = parse_args(args)?;

    let canvas = Arc::new(TerminalCanvas::stdout(options.palette.clone()));
    let mut app = VisualizerApp::new(canvas, options);
    if let Some(seed) = seed {
        app = app.with_seed(seed);
    }

    app.handle(Command::Show)?;
    app.canvas().print("Type `help` for the list of commands.");

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if app.handle(command)? == Flow::Quit {
                    break;
                }
            }
            Err(e) => app.canvas().print(&format!("{e:#}")),
        }
    }

    info!("Exiting with {} nodes", app.snapshot().node_count());
    Ok(())
}
