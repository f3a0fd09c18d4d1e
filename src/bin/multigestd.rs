//! multigestd: classify touchpad/touchscreen gestures and report them.
//!
//! Listens on a libinput seat (requires the `libinput` feature) or replays a
//! JSON-lines event script, and writes every fired gesture as a log line or JSON.

use anyhow::Context;
use clap::Parser;
use multigest::backends::scripted::ScriptedSource;
use multigest::backends::{self, EventSource};
use multigest::config::{Config, OutputFormat};
use multigest::{EventRouter, Gesture, GestureHandler, GestureLogger, JsonLinesWriter};
use std::io::Stdout;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Multi-touch gesture daemon
#[derive(Parser, Debug)]
#[command(name = "multigestd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,

    /// Replay a JSON-lines event script instead of listening on a seat
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// udev seat to listen on (overrides the config file)
    #[arg(short, long)]
    seat: Option<String>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// List multitouch devices on the seat and exit
    #[arg(long)]
    list: bool,
}

enum Output {
    Log(GestureLogger),
    Json(JsonLinesWriter<Stdout>),
}

impl GestureHandler for Output {
    fn on_gesture(&mut self, gesture: &Gesture) {
        match self {
            Output::Log(h) => h.on_gesture(gesture),
            Output::Json(h) => h.on_gesture(gesture),
        }
    }
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s {
        "log" => Ok(OutputFormat::Log),
        "json" => Ok(OutputFormat::Json),
        other => Err(format!("unknown format '{other}' (expected 'log' or 'json')")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(seat) = cli.seat.clone() {
        config.source.seat = seat;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    config.validate()?;

    if cli.list {
        return list_devices(&config.source.seat);
    }

    let handler = match config.output.format {
        OutputFormat::Log => Output::Log(GestureLogger::new()),
        OutputFormat::Json => Output::Json(JsonLinesWriter::new(std::io::stdout())),
    };
    let mut router = EventRouter::with_thresholds(handler, config.thresholds());

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = stop.clone();
    ctrlc::set_handler(move || {
        stop_handler.store(true, Ordering::SeqCst);
    })?;

    let mut source = open_source(cli.replay.as_deref(), &config.source.seat)?;
    backends::run(source.as_mut(), &mut router, &stop)?;

    let stats = router.stats();
    info!(
        events = stats.events,
        gestures = stats.gestures,
        unregistered = stats.unregistered,
        below_threshold = stats.below_threshold,
        "stopped"
    );
    Ok(())
}

fn open_source(replay: Option<&Path>, seat: &str) -> anyhow::Result<Box<dyn EventSource>> {
    if let Some(path) = replay {
        let source = ScriptedSource::open(path)
            .with_context(|| format!("failed to read replay script {}", path.display()))?;
        info!("replaying {} event(s) from {}", source.len(), path.display());
        return Ok(Box::new(source));
    }
    open_live(seat)
}

#[cfg(all(feature = "libinput", target_os = "linux"))]
fn open_live(seat: &str) -> anyhow::Result<Box<dyn EventSource>> {
    let source = backends::libinput::LibinputSource::open(seat)
        .context("failed to open libinput (check permissions on /dev/input)")?;
    Ok(Box::new(source))
}

#[cfg(not(all(feature = "libinput", target_os = "linux")))]
fn open_live(_seat: &str) -> anyhow::Result<Box<dyn EventSource>> {
    anyhow::bail!("built without the `libinput` feature; use --replay <FILE>")
}

#[cfg(all(feature = "libinput", target_os = "linux"))]
fn list_devices(seat: &str) -> anyhow::Result<()> {
    let devices = backends::libinput::list_multitouch_devices(seat)?;
    if devices.is_empty() {
        anyhow::bail!("no multitouch device found on {seat}");
    }
    for device in devices {
        println!("{device}");
    }
    Ok(())
}

#[cfg(not(all(feature = "libinput", target_os = "linux")))]
fn list_devices(_seat: &str) -> anyhow::Result<()> {
    anyhow::bail!("built without the `libinput` feature; device listing is unavailable")
}
