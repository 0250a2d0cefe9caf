use anyhow::Result;
use clap::Parser;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, Orientation};
use log::{debug, error, info, trace, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use g5_panel::config::AppConfig;
use g5_panel::displayers::{self, EngineGauge, InstrumentWidget};
use g5_panel::snapshot;
use g5_panel::sources::{ReplaySource, SweepSource, TelemetrySource};
use g5_panel_core::{Instrument, ParamValue, ParameterName, Registry};

const APP_ID: &str = "org.g5panel.G5Panel";

/// g5-panel - telemetry-driven flight instrument gauges
#[derive(Parser, Debug, Clone)]
#[command(name = "g5-panel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Configuration file (defaults to the per-user config directory)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Replay recorded telemetry batches from a JSON-lines file
    #[arg(short = 'r', long = "replay", value_name = "PATH")]
    replay: Option<PathBuf>,

    /// Render the engine gauge to a PNG file and exit
    #[arg(long = "snapshot", value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Engine RPM shown in the snapshot
    #[arg(long = "rpm", value_name = "RPM", default_value = "0", value_parser = parse_rpm)]
    rpm: ParamValue,

    /// List every instrument parameter with its default and exit
    #[arg(long = "list-parameters")]
    list_parameters: bool,
}

/// Parse an RPM, keeping integers as integers
fn parse_rpm(s: &str) -> Result<ParamValue, String> {
    let s = s.trim();
    if let Ok(value) = s.parse::<i64>() {
        return Ok(ParamValue::Int(value));
    }
    s.parse::<f64>()
        .map(ParamValue::Float)
        .map_err(|e| format!("Invalid RPM '{}': {}", s, e))
}

fn main() -> glib::ExitCode {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting g5-panel v{}", env!("CARGO_PKG_VERSION"));

    if cli.list_parameters {
        list_parameters();
        return glib::ExitCode::SUCCESS;
    }

    if let Some(path) = &cli.snapshot {
        return match export_snapshot(path, cli.rpm) {
            Ok(()) => glib::ExitCode::SUCCESS,
            Err(e) => {
                error!("Snapshot failed: {:#}", e);
                glib::ExitCode::FAILURE
            }
        };
    }

    let app = Application::builder().application_id(APP_ID).build();
    app.connect_activate(move |app| build_ui(app, &cli));

    // Run the application (pass only the program name since we already parsed the args)
    app.run_with_args(&["g5-panel"])
}

fn list_parameters() {
    println!("Instrument parameters ({}):", ParameterName::COUNT);
    for name in ParameterName::ALL {
        println!("  {:<20} {}", name.key(), name.default_value());
    }
}

fn export_snapshot(path: &Path, rpm: ParamValue) -> Result<()> {
    let mut gauge = EngineGauge::new();
    gauge.state_mut().set_engine_rpm(rpm);
    snapshot::write_png(&gauge, path)?;
    info!("Wrote {} at {} rpm", path.display(), rpm);
    Ok(())
}

/// Config from `--config`, else the per-user file, else defaults
fn load_config(cli: &Cli) -> AppConfig {
    if let Some(path) = &cli.config {
        match AppConfig::load_from_path(path) {
            Ok(config) => {
                info!("Loaded configuration from: {}", path.display());
                return config;
            }
            Err(e) => warn!("Failed to load config file '{}': {:#}", path.display(), e),
        }
    }

    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        }
    }
}

fn build_ui(app: &Application, cli: &Cli) {
    info!("Building UI");

    let config = load_config(cli);

    let mut registry = Registry::new();
    displayers::register_all(&mut registry);

    let row = gtk4::Box::new(Orientation::Horizontal, 0);
    let mut widgets = Vec::with_capacity(config.instruments.len());
    for id in &config.instruments {
        match registry.create_instrument(id) {
            Ok(instrument) => {
                let widget = InstrumentWidget::new(instrument);
                row.append(&widget.widget());
                widgets.push(widget);
            }
            Err(e) => warn!("Skipping instrument '{}': {}", id, e),
        }
    }
    if widgets.is_empty() {
        error!("No instruments to show; check the `instruments` list in the configuration");
    }

    let window = ApplicationWindow::builder()
        .application(app)
        .title(config.window.title.as_str())
        .default_width(config.window.width)
        .default_height(config.window.height)
        .child(&row)
        .build();

    let source: Box<dyn TelemetrySource> = match &cli.replay {
        Some(path) => match ReplaySource::from_path(path) {
            Ok(replay) => Box::new(replay),
            Err(e) => {
                warn!("{}; falling back to the demo sweep", e);
                Box::new(SweepSource::new(config.telemetry.sweep.clone()))
            }
        },
        None => Box::new(SweepSource::new(config.telemetry.sweep.clone())),
    };
    let interval = Duration::from_millis(config.telemetry.interval_ms.max(1));
    start_telemetry(source, widgets, interval);

    window.present();
}

/// Pull a batch from `source` every `interval` and hand it to every widget
fn start_telemetry(mut source: Box<dyn TelemetrySource>, widgets: Vec<InstrumentWidget>, interval: Duration) {
    info!("Telemetry from '{}' every {:?}", source.name(), interval);

    glib::timeout_add_local(interval, move || {
        let Some(batch) = source.next_batch() else {
            info!("Telemetry source '{}' finished", source.name());
            return glib::ControlFlow::Break;
        };

        for widget in &widgets {
            match widget.apply_updates(&batch) {
                Some(report) if !report.is_clean() => debug!(
                    "{}: {} of {} entries rejected",
                    widget.id(),
                    report.failures.len(),
                    report.total()
                ),
                Some(_) => {}
                None => trace!("{} busy, batch dropped", widget.id()),
            }
        }

        glib::ControlFlow::Continue
    });
}
