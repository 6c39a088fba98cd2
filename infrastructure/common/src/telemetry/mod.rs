pub mod config;
pub use self::config::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{Layer, Registry};

fn env_filter(level: Level, directives: &str, env: Option<&str>) -> EnvFilter {
    let mut builder = EnvFilter::builder().with_default_directive(level.as_filter().into());
    if let Some(env) = env.filter(|env| !env.is_empty()) {
        builder = builder.with_env_var(env);
    }
    builder.parse_lossy(directives)
}

impl SinkFilter {
    fn env_filter(&self) -> EnvFilter {
        env_filter(self.level, &self.directives, None)
    }
}

/// Installs the global subscriber: a console layer and an optional file layer.
pub fn initialize_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    if !config.enable {
        return Ok(());
    }
    let global = env_filter(config.level, &config.directives, config.directives_env.as_deref());
    let console = config.console.enable.then(|| {
        let sink = &config.console.filter;
        tracing_subscriber::fmt::layer()
            .with_file(sink.verbose)
            .with_line_number(sink.verbose)
            .with_thread_ids(sink.verbose)
            .with_target(sink.verbose)
            .with_filter(sink.env_filter())
    });
    let file = config.file.enable.then(|| {
        let file = &config.file;
        let appender =
            RollingFileAppender::new(file.rotation.into(), &file.directory, &file.file_name);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(appender)
            .with_file(file.filter.verbose)
            .with_line_number(file.filter.verbose)
            .with_thread_ids(file.filter.verbose)
            .with_target(file.filter.verbose)
            .with_filter(file.filter.env_filter())
    });
    Registry::default().with(global).with(console).with(file).try_init()?;
    Ok(())
}
