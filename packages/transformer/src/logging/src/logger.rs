use crate::diagnostics::Diagnostic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// Errors log as `Error`, every other category as `Warn`.
    pub fn of_diagnostic(diagnostic: &Diagnostic) -> Self {
        if diagnostic.is_error() {
            LogLevel::Error
        } else {
            LogLevel::Warn
        }
    }
}

/// Sink for pipeline progress and diagnostics. Implementors only provide
/// [`Logger::log`]; messages below [`Logger::level`] are dropped before reaching it.
pub trait Logger: Send + Sync {
    fn level(&self) -> LogLevel;

    fn log(&self, level: LogLevel, msg: &str);

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    fn emit(&self, level: LogLevel, msg: &str) {
        if self.is_enabled(level) {
            self.log(level, msg);
        }
    }

    fn debug(&self, msg: &str) {
        self.emit(LogLevel::Debug, msg)
    }

    fn info(&self, msg: &str) {
        self.emit(LogLevel::Info, msg)
    }

    fn warn(&self, msg: &str) {
        self.emit(LogLevel::Warn, msg)
    }

    fn error(&self, msg: &str) {
        self.emit(LogLevel::Error, msg)
    }

    fn diagnostic(&self, diagnostic: &Diagnostic) {
        self.emit(LogLevel::of_diagnostic(diagnostic), &diagnostic.to_string())
    }

    fn diagnostics(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.diagnostic(diagnostic);
        }
    }
}

/// Default handle of a [`Project`](crate::project::Project): discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl NullLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NullLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn is_enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn log(&self, _level: LogLevel, _msg: &str) {}
}
