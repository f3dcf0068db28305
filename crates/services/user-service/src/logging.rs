//! Tracing setup: JSON to stdout plus one JSON file per level.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use common::LogConfig;
use tracing::Level;
use tracing_subscriber::{
    filter::{filter_fn, FilterExt, LevelFilter, Targets},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Crates whose events are logged at the configured level.
const APP_TARGETS: [&str; 3] = ["user_service", "user_service_lib", "common"];

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the console filter. Otherwise our own crates log at
/// `debug` when debug logging is enabled and `info` when not, and everything
/// else at `warn`.
pub fn init(config: &LogConfig, verbose: bool) -> io::Result<()> {
    let debug = config.debug || verbose;
    let max_level = if debug { Level::DEBUG } else { Level::INFO };

    let console: BoxedLayer = match EnvFilter::try_from_default_env() {
        Ok(filter) => tracing_subscriber::fmt::layer()
            .json()
            .with_filter(filter)
            .boxed(),
        Err(_) => tracing_subscriber::fmt::layer()
            .json()
            .with_filter(app_targets(max_level))
            .boxed(),
    };

    let mut layers: Vec<BoxedLayer> = vec![console];
    for (level, path) in level_files(config, debug) {
        layers.push(file_layer(level, path, app_targets(max_level))?);
    }

    tracing_subscriber::registry().with(layers).init();
    Ok(())
}

/// Our crates up to `max_level`, SQL statements at info, the rest at warn.
fn app_targets(max_level: Level) -> Targets {
    APP_TARGETS
        .iter()
        .fold(Targets::new(), |targets, target| {
            targets.with_target(*target, max_level)
        })
        .with_target("sqlx::query", LevelFilter::INFO)
        .with_default(LevelFilter::WARN)
}

/// Levels that get their own file, with the configured path.
fn level_files(config: &LogConfig, debug: bool) -> Vec<(Level, &str)> {
    let mut files = vec![
        (Level::INFO, config.info_file.as_str()),
        (Level::WARN, config.warn_file.as_str()),
        (Level::ERROR, config.error_file.as_str()),
    ];
    if debug {
        files.push((Level::DEBUG, config.debug_file.as_str()));
    }
    files
}

/// JSON layer appending the events of exactly `level` that `targets` admits to `path`.
fn file_layer(level: Level, path: &str, targets: Targets) -> io::Result<BoxedLayer> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Ok(tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .with_filter(
            filter_fn(move |meta| *meta.level() == level)
                .with_max_level_hint(level)
                .and(targets),
        )
        .boxed())
}
