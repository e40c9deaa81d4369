//! Diagnostic logging setup for rowlog
//!
//! The rowlog crates emit `tracing` events and spans but never install a
//! subscriber themselves. Hosts and test suites call
//! [`RowlogSubscriberBuilder`] once at startup to decide where those events
//! go.
//!
//! # Features
//!
//! - **JSONL Output**: structured JSON lines for log aggregation (default)
//! - **Pretty Output**: human-readable console output for development
//! - **Test Capture**: output routed through the test harness writer
//! - **File Rotation**: daily/hourly log rotation via tracing-appender
//!
//! # Quick Start
//!
//! ```ignore
//! use rowlog_logging::{LogConfig, RowlogSubscriberBuilder};
//!
//! // JSONL to console with defaults
//! let _guard = RowlogSubscriberBuilder::new().init();
//!
//! // In tests, ignore the error when another test already installed one
//! let _ = RowlogSubscriberBuilder::new()
//!     .with_config(LogConfig::testing())
//!     .try_init();
//! ```

pub mod config;

pub use config::{ConsoleConfig, FileConfig, JsonlConfig, LogConfig, RotationStrategy};

use std::fs::{self, File};

use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, MakeWriter, TestWriter};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory or file could not be created
    #[error("Log file error: {0}")]
    Io(#[from] std::io::Error),

    /// A global subscriber is already installed
    #[error("Subscriber init error: {0}")]
    Init(#[from] TryInitError),
}

/// Builder for configuring and initializing the rowlog logging subscriber
///
/// By default, console output uses JSONL format. Use `LogConfig::development()`
/// for human-readable pretty output during development.
#[derive(Debug, Clone, Default)]
pub struct RowlogSubscriberBuilder {
    config: LogConfig,
}

impl RowlogSubscriberBuilder {
    /// Create a new subscriber builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    /// Route console output through the test harness
    pub fn with_test_writer(mut self) -> Self {
        self.config.console.test_writer = true;
        self
    }

    /// Configure file output
    pub fn with_file_output(mut self, config: FileConfig) -> Self {
        self.config.file = Some(config);
        self
    }

    /// Current configuration
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Install the subscriber globally
    ///
    /// Returns a guard that must be kept alive for file output to be
    /// flushed.
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber has already been set or the log file
    /// cannot be created. Use [`try_init`](Self::try_init) to handle that.
    pub fn init(self) -> Option<WorkerGuard> {
        match self.try_init() {
            Ok(guard) => guard,
            Err(e) => panic!("failed to initialize rowlog logging: {e}"),
        }
    }

    /// Install the subscriber globally, reporting failure instead of panicking
    pub fn try_init(self) -> Result<Option<WorkerGuard>, LoggingError> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.config.default_level));

        let mut layers: Vec<BoxedLayer> = Vec::new();
        let mut guard = None;

        if self.config.console.enabled {
            layers.push(console_layer(&self.config));
        }

        if let Some(file_config) = &self.config.file {
            let (writer, file_guard) = file_writer(file_config)?;
            guard = Some(file_guard);
            layers.push(jsonl_layer(&self.config.jsonl, writer));
        }

        Registry::default()
            .with(layers)
            .with(env_filter)
            .try_init()?;

        Ok(guard)
    }
}

fn console_layer(config: &LogConfig) -> BoxedLayer {
    let console = &config.console;
    match (console.pretty, console.test_writer) {
        (true, true) => pretty_layer(console.ansi, TestWriter::new),
        (true, false) => pretty_layer(console.ansi, std::io::stdout),
        (false, true) => jsonl_layer(&config.jsonl, TestWriter::new),
        (false, false) => jsonl_layer(&config.jsonl, std::io::stdout),
    }
}

fn pretty_layer<W>(ansi: bool, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(writer)
        .boxed()
}

fn jsonl_layer<W>(jsonl: &JsonlConfig, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(jsonl.include_spans)
        .flatten_event(jsonl.flatten_events)
        .with_file(jsonl.include_location)
        .with_line_number(jsonl.include_location)
        .with_writer(writer)
        .boxed()
}

/// Create the non-blocking file writer; truncates for `Never`, appends for others
fn file_writer(config: &FileConfig) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    fs::create_dir_all(&config.directory)?;

    let writer = match config.rotation {
        RotationStrategy::Never => {
            let file_path = config.directory.join(format!("{}.log", config.prefix));
            tracing_appender::non_blocking(File::create(file_path)?)
        }
        RotationStrategy::Daily => tracing_appender::non_blocking(RollingFileAppender::new(
            Rotation::DAILY,
            &config.directory,
            &config.prefix,
        )),
        RotationStrategy::Hourly => tracing_appender::non_blocking(RollingFileAppender::new(
            Rotation::HOURLY,
            &config.directory,
            &config.prefix,
        )),
    };

    Ok(writer)
}
