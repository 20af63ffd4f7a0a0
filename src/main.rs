//! logball CLI - animate log lines on a software canvas
//!
//! Reads one arrival per stdin line (or generates demo traffic), renders
//! frames at a fixed rate into an in-memory raster and logs stats.
//!
//! Run with: tail -f access.log | cargo run --features cli -- --snapshot frame.ppm

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use logball::canvas::PixelCanvas;
use logball::core::ConfigError;
use logball::demo::DemoFeed;
use logball::time::now_seconds;
use logball::{Engine, EngineConfig, Host};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "\
usage: logball [options]

  --width N          surface width in pixels (default 800)
  --height N         surface height in pixels (default 600)
  --fps N            frames per second (default 60, max 1000)
  --demo[=RATE]      generate RATE random requests per minute (default 300);
                     stdin lines are then read as keys (f, r, ?) or
                     command ids (toggle-fps-display, toggle-rpm-display)
  --frames N         stop after N frames
  --snapshot PATH    write the last frame as a PPM image on exit
  --config PATH      JSON engine config (or LOGBALL_CONFIG)
  -h, --help         show this help";

const DEFAULT_DEMO_RATE: f64 = 300.0;
const MAX_FPS: f64 = 1000.0;
const STATS_PERIOD: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    width: u32,
    height: u32,
    fps: f64,
    demo: Option<f64>,
    frames: Option<u64>,
    snapshot: Option<PathBuf>,
    config: Option<PathBuf>,
    help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fps: 60.0,
            demo: None,
            frames: None,
            snapshot: None,
            config: None,
            help: false,
        }
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("invalid value for {flag}: {value}"))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
            None => (arg, None),
        };
        match flag.as_str() {
            "-h" | "--help" => options.help = true,
            "--demo" => {
                options.demo = Some(match inline {
                    Some(rate) => parse_number("--demo", Some(rate))?,
                    None => DEFAULT_DEMO_RATE,
                });
            }
            "--width" => options.width = parse_number(&flag, inline.or_else(|| args.next()))?,
            "--height" => options.height = parse_number(&flag, inline.or_else(|| args.next()))?,
            "--fps" => options.fps = parse_number(&flag, inline.or_else(|| args.next()))?,
            "--frames" => {
                options.frames = Some(parse_number(&flag, inline.or_else(|| args.next()))?);
            }
            "--snapshot" => {
                options.snapshot = Some(PathBuf::from(
                    inline.or_else(|| args.next()).ok_or("--snapshot needs a path")?,
                ));
            }
            "--config" => {
                options.config = Some(PathBuf::from(
                    inline.or_else(|| args.next()).ok_or("--config needs a path")?,
                ));
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    if options.width == 0 || options.height == 0 {
        return Err("surface must be at least 1x1".to_string());
    }
    if !(options.fps.is_finite() && options.fps > 0.0 && options.fps <= MAX_FPS) {
        return Err(format!("fps must be in (0, {MAX_FPS}], got {}", options.fps));
    }
    Ok(options)
}

/// `--config` wins over `LOGBALL_CONFIG`; neither means built-in defaults
fn config_path(flag: Option<PathBuf>, env: Option<OsString>) -> Option<PathBuf> {
    flag.or_else(|| env.filter(|value| !value.is_empty()).map(PathBuf::from))
}

fn load_config(path: Option<PathBuf>) -> Result<EngineConfig, ConfigError> {
    match path {
        Some(path) => EngineConfig::from_path(&path),
        None => Ok(EngineConfig::default()),
    }
}

/// Interpret a stdin line as a key or a command id (demo mode)
fn handle_key_line(host: &mut Host<Engine, PixelCanvas>, line: &str) {
    let line = line.trim();
    if line.chars().count() > 1 {
        if !host.command(line) {
            warn!(command = line, "Unknown command");
        }
        return;
    }
    let Some(key) = line.chars().next() else {
        return;
    };
    if key == '?' {
        for (key, description) in host.key_help() {
            info!(key = %key, description, "Key binding");
        }
        return;
    }
    if !host.key(key) {
        warn!(key = %key, "No command bound to key");
    }
}

fn log_stats(host: &mut Host<Engine, PixelCanvas>) {
    let stats = host.stats(now_seconds());
    let overlay = host
        .surface()
        .text_runs()
        .iter()
        .map(|run| run.text.as_str())
        .collect::<Vec<_>>()
        .join(" | ");
    info!(
        balls = host.state().particles().len(),
        fps = format!("{:.1}", stats.fps),
        rpm = format!("{:.0}", stats.events_per_minute),
        frames = host.frames(),
        arrivals = host.total_arrivals(),
        overlay = %overlay,
        "stats"
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,logball=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    if options.help {
        println!("{USAGE}");
        return Ok(());
    }

    let env_config = std::env::var_os("LOGBALL_CONFIG");
    let config = load_config(config_path(options.config.clone(), env_config))?;
    let seed = config.seed;

    let mut host: Host<Engine, PixelCanvas> =
        Host::launch(PixelCanvas::new(options.width, options.height), config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    // Input ended: keep animating until the last ball has left
    let mut draining = false;

    let mut demo = options.demo.map(|rate| DemoFeed::new(rate, seed));
    let first_gap = demo.as_mut().map_or(Duration::from_secs(3600), |feed| feed.next_gap());
    let demo_sleep = sleep(first_gap);
    tokio::pin!(demo_sleep);

    let mut frame_interval = interval(Duration::from_secs_f64(1.0 / options.fps));
    frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stats_interval = interval(STATS_PERIOD);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    info!(
        width = options.width,
        height = options.height,
        fps = options.fps,
        demo = ?options.demo,
        "Animating, press Ctrl-C to stop"
    );

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        if demo.is_some() {
                            handle_key_line(&mut host, &line);
                        } else {
                            host.arrival(line, now_seconds());
                        }
                    }
                    Ok(None) => {
                        debug!("stdin closed");
                        stdin_open = false;
                        draining = demo.is_none();
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read stdin");
                        stdin_open = false;
                        draining = demo.is_none();
                    }
                }
            }
            _ = &mut demo_sleep, if demo.is_some() => {
                if let Some(feed) = demo.as_mut() {
                    host.arrival(feed.next_line(), now_seconds());
                    demo_sleep.as_mut().reset(Instant::now() + feed.next_gap());
                }
            }
            _ = frame_interval.tick() => {
                host.tick(now_seconds());
                if options.frames.is_some_and(|limit| host.frames() >= limit) {
                    info!(frames = host.frames(), "Frame limit reached");
                    break;
                }
                if draining && host.state().particles().is_empty() {
                    info!(frames = host.frames(), "Input ended and all balls left the screen");
                    break;
                }
            }
            _ = stats_interval.tick() => {
                log_stats(&mut host);
            }
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
    }

    log_stats(&mut host);

    if let Some(path) = &options.snapshot {
        let file = std::fs::File::create(path)?;
        host.surface().write_ppm(std::io::BufWriter::new(file))?;
        info!(path = %path.display(), "Snapshot written");
    }

    Ok(())
}
