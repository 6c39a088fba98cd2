use serde::{Deserialize, Serialize};
use tracing::metadata::LevelFilter;
use tracing_appender::rolling::Rotation;

/// Logging of the whole process.
///
/// `level` and `directives` form the global filter. Each sink may narrow it further
/// with its own [`SinkFilter`].
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enable: bool,
    pub level: Level,
    /// `EnvFilter` directives such as `sea_orm=warn,repair_shop=debug`.
    pub directives: String,
    /// Environment variable read for more directives, e.g. `RUST_LOG`.
    pub directives_env: Option<String>,
    pub console: ConsoleSink,
    pub file: FileSink,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enable: true,
            level: Level::Info,
            directives: String::new(),
            directives_env: None,
            console: ConsoleSink::default(),
            file: FileSink::default(),
        }
    }
}

#[derive(Default, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Level {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            Level::Off => LevelFilter::OFF,
            Level::Error => LevelFilter::ERROR,
            Level::Warn => LevelFilter::WARN,
            Level::Info => LevelFilter::INFO,
            Level::Debug => LevelFilter::DEBUG,
            Level::Trace => LevelFilter::TRACE,
        }
    }
}

/// Per-sink filtering and event decoration.
#[derive(Default, Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct SinkFilter {
    pub level: Level,
    pub directives: String,
    /// Prints source location, thread id and target with every event.
    pub verbose: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct ConsoleSink {
    pub enable: bool,
    #[serde(flatten)]
    pub filter: SinkFilter,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self {
            enable: true,
            filter: SinkFilter::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct FileSink {
    pub enable: bool,
    #[serde(flatten)]
    pub filter: SinkFilter,
    pub directory: String,
    /// Whole file name, or the prefix of rolled files.
    pub file_name: String,
    pub rotation: Rolling,
}

impl Default for FileSink {
    fn default() -> Self {
        Self {
            enable: false,
            filter: SinkFilter::default(),
            directory: "./logs".to_string(),
            file_name: "repair-shop.log".to_string(),
            rotation: Rolling::Never,
        }
    }
}

#[derive(Default, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rolling {
    Minutely,
    Hourly,
    Daily,
    #[default]
    Never,
}

impl From<Rolling> for Rotation {
    fn from(rolling: Rolling) -> Self {
        match rolling {
            Rolling::Minutely => Rotation::MINUTELY,
            Rolling::Hourly => Rotation::HOURLY,
            Rolling::Daily => Rotation::DAILY,
            Rolling::Never => Rotation::NEVER,
        }
    }
}
