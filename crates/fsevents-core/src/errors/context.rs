//! ErrorContext: operation name plus key/value metadata for a logged error.

use std::fmt;

/// Where a non-fatal error happened: the pipeline operation and the file,
/// catalog entry or path it was working on.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation that failed (e.g. "export", "map").
    pub operation: String,
    /// Additional key-value metadata, in insertion order.
    pub metadata: Vec<(String, String)>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            metadata: Vec::new(),
        }
    }

    /// Attach a key-value metadata pair.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// Look up a metadata value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.operation)?;
        for (k, v) in &self.metadata {
            write!(f, " {}={}", k, v)?;
        }
        Ok(())
    }
}

/// Build an ErrorContext with key/value pairs in one expression.
#[macro_export]
macro_rules! error_context {
    ($op:expr) => {
        $crate::errors::ErrorContext::new($op)
    };
    ($op:expr, $($key:expr => $val:expr),+ $(,)?) => {
        $crate::errors::ErrorContext::new($op)
            $(.with($key, $val))+
    };
}
