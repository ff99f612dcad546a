use log::LevelFilter;
use log4rs::{
    Handle,
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::path::Path;
use anyhow::{Context, Result};

/// Pattern shared by the file and console appenders.
pub const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}";

/// Builds the log4rs configuration for a run.
///
/// Records go to `log_file` and, when `console` is set, also to stderr.
pub fn build_logging_config(log_file: &Path, log_level: LevelFilter, console: bool) -> Result<Config> {
    // Create log directory if it doesn't exist
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_file)
        .with_context(|| format!("opening log file {}", log_file.display()))?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)));
    let mut root = Root::builder().appender("file");

    if console {
        let console_appender = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("console", Box::new(console_appender)));
        root = root.appender("console");
    }

    Ok(builder.build(root.build(log_level))?)
}

/// Installs the run logger. Can only succeed once per process.
pub fn setup_file_logging(log_file: &Path, log_level: LevelFilter, console: bool) -> Result<Handle> {
    let config = build_logging_config(log_file, log_level, console)?;
    let handle = log4rs::init_config(config).context("installing logger")?;
    Ok(handle)
}
