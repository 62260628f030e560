//! Log subscriber setup.
//!
//! Library crates log through the `log` facade; the `LogTracer` bridge hands
//! those records to the tracing subscriber installed by [`init_logging`].

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::str::FromStr;

use sqlsandbox_configs::LoggingSettings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Name of the log file created under `logs_path`.
pub const LOG_FILE_NAME: &str = "server.log";

/// Level applied to `quiet_targets` that have no explicit override.
const QUIET_LEVEL: &str = "warn";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// On-disk record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `timestamp LEVEL target: message`
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        })
    }
}

/// Filter directives in application order: the base level, quiet targets,
/// then the explicit per-target levels (sorted, so the result is stable).
pub fn filter_directives(settings: &LoggingSettings) -> Vec<String> {
    let explicit: BTreeMap<&str, &str> = settings
        .targets
        .iter()
        .map(|(target, level)| (target.as_str(), level.as_str()))
        .collect();

    std::iter::once(settings.level.clone())
        .chain(
            settings
                .quiet_targets
                .iter()
                .filter(|target| !explicit.contains_key(target.as_str()))
                .map(|target| format!("{}={}", target, QUIET_LEVEL)),
        )
        .chain(explicit.iter().map(|(target, level)| format!("{}={}", target, level)))
        .collect()
}

pub fn build_env_filter(settings: &LoggingSettings) -> anyhow::Result<EnvFilter> {
    let joined = filter_directives(settings).join(",");
    EnvFilter::try_new(&joined)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", joined, e))
}

fn open_log_file(settings: &LoggingSettings) -> anyhow::Result<(File, PathBuf)> {
    fs::create_dir_all(&settings.logs_path)?;
    let path = PathBuf::from(&settings.logs_path).join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

fn file_layer(format: LogFormat, file: File, filter: EnvFilter) -> BoxedLayer {
    let base = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_target(true)
        .with_thread_names(true);
    match format {
        LogFormat::Json => base.json().with_filter(filter).boxed(),
        LogFormat::Compact => base.with_ansi(false).with_filter(filter).boxed(),
    }
}

/// Install the global subscriber described by the `[logging]` section: an
/// optional colored console layer plus a file layer at
/// `<logs_path>/server.log`.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    let format = settings.format.parse::<LogFormat>().unwrap_or(LogFormat::Compact);
    let (file, path) = open_log_file(settings)?;

    let mut layers: Vec<BoxedLayer> = vec![file_layer(format, file, build_env_filter(settings)?)];
    if settings.log_to_console {
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_filter(build_env_filter(settings)?)
                .boxed(),
        );
    }

    // Already installed when a test harness or embedder got there first.
    tracing_log::LogTracer::init().ok();

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::trace!(
        "Logging initialized: level={}, format={:?}, console={}, file={}",
        settings.level,
        format,
        settings.log_to_console,
        path.display()
    );

    Ok(())
}
