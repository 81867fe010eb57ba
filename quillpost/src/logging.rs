use std::path::Path;

use thiserror::Error;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
    Layer,
};


#[derive(Debug, Error)]
pub enum TracingInitializationError {
    #[error("unable to set up the rolling log file appender")]
    UnableToCreateLogFileAppender {
        #[from]
        #[source]
        error: InitError,
    },

    #[error("a global tracing subscriber has already been set")]
    SubscriberAlreadyInitialized {
        #[from]
        #[source]
        error: TryInitError,
    },
}


/// Installs the global tracing subscriber: one layer printing to the console
/// and one writing into a daily-rotated log file in `log_file_output_directory`.
///
/// The returned guard flushes the log file writer when dropped,
/// so it must be held until the program exits.
pub fn initialize_tracing<P>(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_output_directory: P,
    log_file_name_prefix: &str,
) -> Result<WorkerGuard, TracingInitializationError>
where
    P: AsRef<Path>,
{
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_file_name_prefix)
        .build(log_file_output_directory.as_ref())?;

    let (non_blocking_file_writer, guard) = tracing_appender::non_blocking(file_appender);


    let console_layer = fmt::layer()
        .with_target(true)
        .with_filter(console_level_filter);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(non_blocking_file_writer)
        .with_filter(log_file_level_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
