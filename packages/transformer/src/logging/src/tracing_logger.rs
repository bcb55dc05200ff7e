use super::logger::{LogLevel, Logger};

/// Forwards to the `tracing` macros under the `di_transformer` target. Filtering is
/// left to the installed subscriber, so every level is passed on.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }

    fn log(&self, level: LogLevel, msg: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "di_transformer", "{}", msg),
            LogLevel::Info => tracing::info!(target: "di_transformer", "{}", msg),
            LogLevel::Warn => tracing::warn!(target: "di_transformer", "{}", msg),
            LogLevel::Error => tracing::error!(target: "di_transformer", "{}", msg),
        }
    }
}
