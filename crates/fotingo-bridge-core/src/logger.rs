//! Logging seam between the bridge and its hosting pipeline

/// A single forwarded log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// Informational output (subprocess stdout, skip reasons)
    Log(String),
    /// Error output (subprocess stderr, failure reports)
    Error(String),
}

/// Sink for output produced while driving fotingo
///
/// The hosting pipeline supplies the logger; every subprocess output chunk
/// and every skip/failure message goes through it.
pub trait ReleaseLogger: Send + Sync {
    /// Forward an informational message
    fn log(&self, message: &str);

    /// Forward an error message
    fn error(&self, message: &str);
}

/// Logger that forwards to tracing
#[derive(Debug, Default)]
pub struct TracingLogger;

impl ReleaseLogger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Logger that collects entries for later inspection (useful for testing)
#[derive(Debug, Default)]
pub struct BufferLogger {
    entries: std::sync::Mutex<Vec<LogEntry>>,
}

impl BufferLogger {
    /// Create an empty buffer logger
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected entries, in arrival order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Informational messages only, in arrival order
    pub fn logs(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                LogEntry::Log(m) => Some(m),
                LogEntry::Error(_) => None,
            })
            .collect()
    }

    /// Error messages only, in arrival order
    pub fn errors(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                LogEntry::Error(m) => Some(m),
                LogEntry::Log(_) => None,
            })
            .collect()
    }
}

impl ReleaseLogger for BufferLogger {
    fn log(&self, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push(LogEntry::Log(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push(LogEntry::Error(message.to_string()));
    }
}
