//! Error kinds and the error side channel.
//!
//! Failing operations never unwind. They record an [`ErrorKind`] (plus an
//! optional short context string) in [`Diagnostics`] and report an error
//! status to their caller; scripts read the same state through the
//! `filp_error` and `filp_error_info` variables.

/// Maximum length of the error context text, in bytes.
pub const INFO_CAPACITY: usize = 80;

/// What went wrong. Codes are stable: scripts index `filp_error_strings`
/// with them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    /// A bare name that is neither bound nor a permitted literal.
    #[error("token not found")]
    TokenNotFound,
    #[error("scalar expected")]
    ScalarExpected,
    /// An operation reached a branch that should be unreachable.
    #[error("internal error")]
    InternalError,
    #[error("out of memory")]
    OutOfMemory,
    #[error("array expected")]
    ArrayExpected,
    #[error("file expected")]
    FileExpected,
    #[error("file not found")]
    FileNotFound,
    /// Attempted while running isolated.
    #[error("permission denied")]
    PermissionDenied,
    #[error("not implemented")]
    NotImplemented,
    #[error("syntax error")]
    SyntaxError,
}

impl ErrorKind {
    /// Every kind, in code order.
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::TokenNotFound,
        ErrorKind::ScalarExpected,
        ErrorKind::InternalError,
        ErrorKind::OutOfMemory,
        ErrorKind::ArrayExpected,
        ErrorKind::FileExpected,
        ErrorKind::FileNotFound,
        ErrorKind::PermissionDenied,
        ErrorKind::NotImplemented,
        ErrorKind::SyntaxError,
    ];

    /// Numeric code, starting at 1. Zero means "no error".
    pub const fn code(self) -> i64 {
        match self {
            ErrorKind::TokenNotFound => 1,
            ErrorKind::ScalarExpected => 2,
            ErrorKind::InternalError => 3,
            ErrorKind::OutOfMemory => 4,
            ErrorKind::ArrayExpected => 5,
            ErrorKind::FileExpected => 6,
            ErrorKind::FileNotFound => 7,
            ErrorKind::PermissionDenied => 8,
            ErrorKind::NotImplemented => 9,
            ErrorKind::SyntaxError => 10,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Symbolic name, as in `TOKEN_NOT_FOUND`.
    pub const fn name(self) -> &'static str {
        match self {
            ErrorKind::TokenNotFound => "TOKEN_NOT_FOUND",
            ErrorKind::ScalarExpected => "SCALAR_EXPECTED",
            ErrorKind::InternalError => "INTERNAL_ERROR",
            ErrorKind::OutOfMemory => "OUT_OF_MEMORY",
            ErrorKind::ArrayExpected => "ARRAY_EXPECTED",
            ErrorKind::FileExpected => "FILE_EXPECTED",
            ErrorKind::FileNotFound => "FILE_NOT_FOUND",
            ErrorKind::PermissionDenied => "PERMISSION_DENIED",
            ErrorKind::NotImplemented => "NOT_IMPLEMENTED",
            ErrorKind::SyntaxError => "SYNTAX_ERROR",
        }
    }

    /// Human-readable message, as stored in `filp_error_strings`.
    pub const fn message(self) -> &'static str {
        match self {
            ErrorKind::TokenNotFound => "token not found",
            ErrorKind::ScalarExpected => "scalar expected",
            ErrorKind::InternalError => "internal error",
            ErrorKind::OutOfMemory => "out of memory",
            ErrorKind::ArrayExpected => "array expected",
            ErrorKind::FileExpected => "file expected",
            ErrorKind::FileNotFound => "file not found",
            ErrorKind::PermissionDenied => "permission denied",
            ErrorKind::NotImplemented => "not implemented",
            ErrorKind::SyntaxError => "syntax error",
        }
    }
}

/// Last error code and its context text.
///
/// The code is a plain integer because scripts may assign any value to
/// `filp_error`; [`Diagnostics::kind`] maps it back when it is a known code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    code: i64,
    info: Vec<u8>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `kind`, keeping the current context text.
    pub fn set(&mut self, kind: ErrorKind) {
        self.code = kind.code();
    }

    /// Record `kind` with context text, truncated to [`INFO_CAPACITY`].
    pub fn set_with_info(&mut self, kind: ErrorKind, info: &[u8]) {
        self.code = kind.code();
        self.set_info(info);
    }

    /// Reset the code to zero. The context text is left as is.
    pub fn clear(&mut self) {
        self.code = 0;
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn set_code(&mut self, code: i64) {
        self.code = code;
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_code(self.code)
    }

    pub fn is_error(&self) -> bool {
        self.code != 0
    }

    pub fn info(&self) -> &[u8] {
        &self.info
    }

    pub fn set_info(&mut self, info: &[u8]) {
        let len = info.len().min(INFO_CAPACITY);
        self.info.clear();
        self.info.extend_from_slice(&info[..len]);
    }
}
