use crate::report::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Boundary status: success.
pub const STATUS_OK: i32 = 0;
/// Boundary status: the guest failed, or the interpreter could not be created.
pub const STATUS_FAILED: i32 = -1;
/// Boundary status: `initialize` was called twice.
pub const STATUS_ALREADY_INITIALIZED: i32 = -2;
/// Boundary status: an operation ran before `initialize`.
pub const STATUS_NOT_INITIALIZED: i32 = -3;
/// Boundary status: source text was null or not UTF-8.
pub const STATUS_INVALID_SOURCE: i32 = -4;
/// Boundary status: the host was re-entered while already running.
pub const STATUS_BUSY: i32 = -5;

/// Errors surfaced by the script host.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to create interpreter: {0}")]
    Allocation(#[source] rquickjs::Error),

    #[error("failed to register host API: {0}")]
    Registration(#[source] rquickjs::Error),

    #[error("script evaluation failed: {0}")]
    Evaluation(Diagnostic),

    #[error("update hook failed: {0}")]
    Invocation(Diagnostic),

    #[error("failed to read script '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("script host is not initialized")]
    NotInitialized,

    #[error("script host is already initialized")]
    AlreadyInitialized,

    #[error("script host is busy")]
    Busy,

    #[error("script source is null or not valid UTF-8")]
    InvalidSource,
}

impl ScriptError {
    /// Status code reported across the embedder boundary. Always negative.
    pub fn status(&self) -> i32 {
        match self {
            ScriptError::Allocation(_)
            | ScriptError::Registration(_)
            | ScriptError::Evaluation(_)
            | ScriptError::Invocation(_)
            | ScriptError::Io { .. } => STATUS_FAILED,
            ScriptError::AlreadyInitialized => STATUS_ALREADY_INITIALIZED,
            ScriptError::NotInitialized => STATUS_NOT_INITIALIZED,
            ScriptError::InvalidSource => STATUS_INVALID_SOURCE,
            ScriptError::Busy => STATUS_BUSY,
        }
    }

    /// Diagnostic text for guest-originated failures.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            ScriptError::Evaluation(diagnostic) | ScriptError::Invocation(diagnostic) => {
                Some(diagnostic)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_maps_to_a_negative_status() {
        let diagnostic = Diagnostic::new("boom", None);
        let errors = [
            ScriptError::Evaluation(diagnostic.clone()),
            ScriptError::Invocation(diagnostic),
            ScriptError::NotInitialized,
            ScriptError::AlreadyInitialized,
            ScriptError::Busy,
            ScriptError::InvalidSource,
        ];
        for error in &errors {
            assert!(error.status() < 0, "{error} should be negative");
        }
        assert_eq!(ScriptError::NotInitialized.status(), STATUS_NOT_INITIALIZED);
    }

    #[test]
    fn guest_failures_carry_diagnostics() {
        let error = ScriptError::Invocation(Diagnostic::new("bad tick", None));
        assert_eq!(error.diagnostic().map(|d| d.message.as_str()), Some("bad tick"));
        assert!(ScriptError::Busy.diagnostic().is_none());
        assert_eq!(error.to_string(), "update hook failed: bad tick");
    }
}
