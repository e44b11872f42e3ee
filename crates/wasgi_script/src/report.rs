//! Guest failure reporting
//!
//! The one place where a guest exception becomes host-visible text. The
//! caught value is consumed here and never handed back to the caller.

use rquickjs::convert::Coerced;
use rquickjs::{CaughtError, Value};
use std::fmt;
use wasgi_services::{LogLevel, LogSink};

/// Sink target for guest failures.
pub const REPORT_TARGET: &str = "script";

/// Message and stack trace extracted from a guest failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub stack: Option<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, stack: Option<String>) -> Self {
        Self {
            message: message.into(),
            stack: stack.filter(|stack| !stack.trim().is_empty()),
        }
    }

    /// Pull diagnostics out of a caught failure. Never fails: anything that
    /// cannot be printed is described generically.
    pub fn from_caught(caught: &CaughtError<'_>) -> Self {
        match caught {
            CaughtError::Exception(exception) => {
                let message = coerce_to_string(exception.as_value())
                    .or_else(|| exception.message())
                    .unwrap_or_else(|| "<unprintable exception>".to_string());
                Self::new(message, exception.stack())
            }
            CaughtError::Value(value) => Self::new(
                coerce_to_string(value).unwrap_or_else(|| format!("<thrown {}>", value.type_name())),
                None,
            ),
            CaughtError::Error(error) => Self::new(error.to_string(), None),
        }
    }

    /// `<label>: <message>` followed by the indented stack when there is one.
    pub fn render(&self, label: &str) -> String {
        match &self.stack {
            Some(stack) => format!("{label}: {}\n  {}", self.message, stack.trim_end()),
            None => format!("{label}: {}", self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// `String(value)`, swallowing any exception a hostile `toString` throws.
fn coerce_to_string(value: &Value<'_>) -> Option<String> {
    match value.get::<Coerced<String>>() {
        Ok(Coerced(text)) => Some(text),
        Err(_) => {
            drop(value.ctx().catch());
            None
        }
    }
}

/// Emit one error record for `caught` and release it.
pub fn report(sink: &dyn LogSink, caught: CaughtError<'_>, label: &str) -> Diagnostic {
    let diagnostic = Diagnostic::from_caught(&caught);
    drop(caught);

    sink.emit(LogLevel::Error, REPORT_TARGET, &diagnostic.render(label));
    diagnostic
}
