//! Error types for the pen plotter actuator.
//!
//! Every rejected operation surfaces as a [`PenError`] carrying the name of
//! the operation that raised it, a [`ReasonCode`] and a short message.  The
//! error is terminal from the actuator's point of view: the pen stops its
//! motors before returning it and never retries on its own.  Whether to
//! re-home or abort is the caller's decision.

use core::fmt::{self, Write};

// ---------------------------------------------------------------------------
// Reason codes
// ---------------------------------------------------------------------------

/// Why an operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReasonCode {
    /// The actuator is in a state it cannot act from.
    Unknown = 0,
    /// The operation is illegal in the current state, or homing is running.
    NotAllowed = 1,
    /// A location or speed argument is outside its bounds.
    InvalidParameters = 2,
}

impl ReasonCode {
    /// Decode a raw reason code.  Anything unrecognised maps to `Unknown`.
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::NotAllowed,
            2 => Self::InvalidParameters,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label shown on the alarm display.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::NotAllowed => "Not Allowed",
            Self::InvalidParameters => "Invalid Parameters",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Pen errors
// ---------------------------------------------------------------------------

/// Maximum message length kept in a [`PenError`].  Longer messages are
/// truncated at a character boundary.
pub const MAX_MESSAGE_LEN: usize = 64;

/// A refused or failed pen operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenError {
    function: &'static str,
    reason: ReasonCode,
    message: heapless::String<MAX_MESSAGE_LEN>,
}

impl PenError {
    pub fn new(function: &'static str, reason: ReasonCode, message: &str) -> Self {
        let mut buf = heapless::String::new();
        push_truncated(&mut buf, message);
        Self {
            function,
            reason,
            message: buf,
        }
    }

    /// Build an error whose message is produced by `format_args!`.
    pub fn with_args(
        function: &'static str,
        reason: ReasonCode,
        args: fmt::Arguments<'_>,
    ) -> Self {
        let mut buf = heapless::String::new();
        write_truncated(&mut buf, args);
        Self {
            function,
            reason,
            message: buf,
        }
    }

    /// Name of the operation that raised the error, e.g. `"Pen.moveTo"`.
    pub fn function(&self) -> &'static str {
        self.function
    }

    pub fn reason(&self) -> ReasonCode {
        self.reason
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.function, self.reason, self.message)
    }
}

// ---------------------------------------------------------------------------
// Fixed-capacity text
// ---------------------------------------------------------------------------

/// Append `text` to `buf`, dropping whatever does not fit.  Always cuts at a
/// character boundary.
pub(crate) fn push_truncated<const N: usize>(buf: &mut heapless::String<N>, text: &str) {
    for ch in text.chars() {
        if buf.push(ch).is_err() {
            break;
        }
    }
}

/// Format `args` into `buf` with the same truncation as [`push_truncated`].
pub(crate) fn write_truncated<const N: usize>(
    buf: &mut heapless::String<N>,
    args: fmt::Arguments<'_>,
) {
    struct Truncating<'a, const N: usize>(&'a mut heapless::String<N>);

    impl<const N: usize> Write for Truncating<'_, N> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            push_truncated(self.0, s);
            Ok(())
        }
    }

    // The writer never reports an error; overflow is dropped above.
    let _ = Truncating(buf).write_fmt(args);
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Rejected configuration.  Values are never clamped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document could not be parsed.
    Malformed,
    /// A field failed range validation; the text names the field.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "config malformed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Result of a pen operation.
pub type Result<T> = core::result::Result<T, PenError>;
