use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use interest_meter_core::detection::infrastructure::model_resolver;
use interest_meter_core::detection::infrastructure::rustface_detector::RustfaceDetector;
use interest_meter_core::pipeline::monitor_presence_use_case::MonitorPresenceUseCase;
use interest_meter_core::presence::domain::debouncer::PresenceDebouncer;
use interest_meter_core::presence::domain::output_sink::OutputSink;
use interest_meter_core::presence::domain::presence_source::PresenceSource;
use interest_meter_core::presence::infrastructure::console_sink::ConsoleOutputSink;
use interest_meter_core::presence::infrastructure::detector_source::DetectorPresenceSource;
use interest_meter_core::presence::infrastructure::gpio_sink::GpioOutputSink;
use interest_meter_core::presence::infrastructure::line_source::LinePresenceSource;
use interest_meter_core::shared::constants::{
    DEFAULT_DWELL_SECS, DEFAULT_FRAME_THRESHOLD, DEFAULT_LED_PIN, SEETA_MODEL_NAME,
    SEETA_MODEL_URL,
};
use interest_meter_core::video::infrastructure::image_dir_source::ImageDirSource;

/// Debounced face-presence meter driving an LED.
///
/// By default, per-frame presence booleans are read from stdin (one per
/// line, `1`/`0`). With `--frames`, the built-in face detector runs over
/// a directory of frame images instead.
#[derive(Parser)]
#[command(name = "interest-meter")]
struct Cli {
    /// Directory of frame images to run the built-in detector on.
    #[arg(long)]
    frames: Option<PathBuf>,

    /// BCM number of the pin driving the LED.
    #[arg(long, default_value_t = DEFAULT_LED_PIN)]
    pin: u8,

    /// Consecutive same-valued frames that must be exceeded to change state.
    #[arg(long, default_value_t = DEFAULT_FRAME_THRESHOLD)]
    frame_threshold: u32,

    /// Seconds of sustained presence before the LED turns on.
    #[arg(long, default_value_t = DEFAULT_DWELL_SECS)]
    dwell_secs: f64,

    /// SeetaFace model file (skips the cache/download resolver).
    #[arg(long)]
    model: Option<PathBuf>,

    /// Log output transitions instead of driving the GPIO pin.
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))?;
    }

    let engine = PresenceDebouncer::new(
        cli.frame_threshold,
        Duration::from_secs_f64(cli.dwell_secs),
    )?;
    let source = build_source(&cli)?;
    let sink = build_sink(&cli)?;

    let mut use_case = MonitorPresenceUseCase::new(source, sink, engine, stop);
    let report = use_case.execute()?;
    log::info!(
        "{} frame(s) processed, {} command(s) issued",
        report.frames,
        report.commands
    );

    Ok(())
}

fn build_source(cli: &Cli) -> Result<Box<dyn PresenceSource>, Box<dyn std::error::Error>> {
    let Some(dir) = &cli.frames else {
        return Ok(Box::new(LinePresenceSource::new(io::BufReader::new(
            io::stdin(),
        ))));
    };

    let model_path = match &cli.model {
        Some(path) => path.clone(),
        None => {
            log::info!("Resolving model: {SEETA_MODEL_NAME}");
            let path = model_resolver::resolve(
                SEETA_MODEL_NAME,
                SEETA_MODEL_URL,
                None,
                Some(Box::new(download_progress)),
            )?;
            eprintln!();
            path
        }
    };

    let detector = RustfaceDetector::new(&model_path)?;
    let frames = ImageDirSource::new(dir)?;
    if frames.is_empty() {
        log::warn!("no frame images found in {}", dir.display());
    }
    Ok(Box::new(DetectorPresenceSource::new(
        Box::new(frames),
        Box::new(detector),
    )))
}

fn build_sink(cli: &Cli) -> Result<Box<dyn OutputSink>, Box<dyn std::error::Error>> {
    if cli.dry_run {
        Ok(Box::new(ConsoleOutputSink::new()))
    } else {
        Ok(Box::new(GpioOutputSink::new(cli.pin)?))
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.frame_threshold == 0 {
        return Err("Frame threshold must be a positive integer".into());
    }
    if !cli.dwell_secs.is_finite() || cli.dwell_secs <= 0.0 {
        return Err(format!(
            "Dwell must be a positive number of seconds, got {}",
            cli.dwell_secs
        )
        .into());
    }
    if let Some(dir) = &cli.frames {
        if !dir.is_dir() {
            return Err(format!("Frame directory not found: {}", dir.display()).into());
        }
    }
    if let Some(model) = &cli.model {
        if !model.exists() {
            return Err(format!("Model file not found: {}", model.display()).into());
        }
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}
