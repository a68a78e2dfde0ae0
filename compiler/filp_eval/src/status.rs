//! Execution status.

/// Outcome of executing a token, a block or a native word.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// Keep going.
    #[default]
    Ok,
    /// Leave the innermost loop construct.
    Break,
    /// Stop the whole program.
    End,
    /// Stop; the reason is in the machine's diagnostics.
    Error,
}

impl Status {
    /// Numeric form: 0, 1, -2 and -1 respectively.
    pub const fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Break => 1,
            Status::End => -2,
            Status::Error => -1,
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }

    /// Loop constructs stop at a Break but do not pass it on.
    #[must_use]
    pub const fn absorb_break(self) -> Self {
        match self {
            Status::Break => Status::Ok,
            other => other,
        }
    }
}
