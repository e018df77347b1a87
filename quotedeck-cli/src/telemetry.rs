use std::io;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use quotedeck_config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber. Logs always go to stderr; stdout is reserved for data.
///
/// `RUST_LOG` takes precedence over the configured level, and each `-v` raises
/// the configured level one step. The returned guard must be held until exit
/// so the rolling file writer can flush.
pub fn init_tracing(config: &LogConfig, verbosity: u8) -> Result<Option<WorkerGuard>> {
    let level = match verbosity {
        0 => config.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{level}'"))?,
    };

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.json {
        layers.push(fmt::layer().json().with_writer(io::stderr).boxed());
    } else {
        layers.push(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .boxed(),
        );
    }

    let guard = match &config.file {
        Some(path) => {
            let (layer, guard) = file_layer(path)?;
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(guard)
}

fn file_layer(path: &Path) -> Result<(BoxedLayer, WorkerGuard)> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_name()
        .ok_or_else(|| anyhow!("log file path {} has no file name", path.display()))?;
    let appender = tracing_appender::rolling::daily(directory, prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(writer)
        .boxed();
    Ok((layer, guard))
}
