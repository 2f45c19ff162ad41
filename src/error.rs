//! Error types for scanning, dispatch and line injection.
//!
//! Every variant is local and recoverable: the reader stays usable for
//! subsequent bytes after any of them.

use thiserror::Error;

/// Errors reported by [`CommandReader`](crate::scanner::CommandReader).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// `read_source` was called with no stream attached.
    #[error("No stream attached")]
    NoSource,

    /// A line grew past the buffer before a terminator or hotkey resolved it.
    /// The buffered bytes are discarded.
    /// `capacity` is the configured size; one byte of it stays reserved.
    #[error("Line exceeded buffer capacity of {capacity} bytes")]
    BufferOverflow { capacity: usize },

    /// An injected line was rejected. Nothing was mutated.
    #[error("Invalid command line: {0}")]
    InvalidInjection(InvalidLine),

    /// A command descriptor was built with an empty name.
    #[error("Command name must not be empty")]
    EmptyName,
}

/// Why an injected line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidLine {
    #[error("line is empty")]
    Empty,

    #[error("line is {len} bytes, at most {max} fit in the buffer")]
    TooLong { len: usize, max: usize },

    #[error("a command is already being dispatched")]
    Reentrant,
}

impl CommandError {
    /// Stable tag for log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            CommandError::NoSource => "no_source",
            CommandError::BufferOverflow { .. } => "buffer_overflow",
            CommandError::InvalidInjection(_) => "invalid_injection",
            CommandError::EmptyName => "empty_name",
        }
    }
}

impl From<InvalidLine> for CommandError {
    fn from(reason: InvalidLine) -> Self {
        CommandError::InvalidInjection(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_message_names_capacity() {
        let err = CommandError::BufferOverflow { capacity: 8 };
        assert_eq!(err.to_string(), "Line exceeded buffer capacity of 8 bytes");
        assert_eq!(err.error_type(), "buffer_overflow");
    }

    #[test]
    fn invalid_line_converts_into_injection_error() {
        let err: CommandError = InvalidLine::TooLong { len: 9, max: 6 }.into();
        assert_eq!(err, CommandError::InvalidInjection(InvalidLine::TooLong { len: 9, max: 6 }));
        assert_eq!(
            err.to_string(),
            "Invalid command line: line is 9 bytes, at most 6 fit in the buffer"
        );
    }
}
