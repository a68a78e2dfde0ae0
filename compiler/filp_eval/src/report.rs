//! Host-facing view of a pending error.

use filp_core::{Diagnostics, ErrorKind};

/// Snapshot of the error code and context text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("error {code} ({message}){}", context(.info))]
pub struct ErrorReport {
    /// Raw code; scripts can store any integer in `filp_error`.
    pub code: i64,
    /// Symbolic name such as `TOKEN_NOT_FOUND`.
    pub name: &'static str,
    pub message: &'static str,
    pub info: String,
}

fn context(info: &str) -> String {
    if info.is_empty() {
        String::new()
    } else {
        format!(": {info}")
    }
}

impl ErrorReport {
    /// Build a report from the current diagnostics, or `None` if no error
    /// is pending.
    pub fn capture(diagnostics: &Diagnostics) -> Option<Self> {
        if !diagnostics.is_error() {
            return None;
        }
        let kind = diagnostics.kind();
        Some(ErrorReport {
            code: diagnostics.code(),
            name: kind.map_or("UNKNOWN", ErrorKind::name),
            message: kind.map_or("unknown error", ErrorKind::message),
            info: String::from_utf8_lossy(diagnostics.info()).into_owned(),
        })
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_code(self.code)
    }
}
