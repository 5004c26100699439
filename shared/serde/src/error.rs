use thiserror::Error;

/// Errors that can occur while decoding wire bytes.
///
/// A decode failure means the buffer was malformed or truncated. Callers drop
/// the offending message and log; decoding never panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The buffer ended before the value was fully read
    #[error("Buffer ended early: needed {needed} more bytes, {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },

    /// An enum tag on the wire did not match any known variant
    #[error("Invalid tag {tag} on the wire")]
    InvalidTag { tag: u16 },

    /// A string field did not contain valid UTF-8
    #[error("String field contained invalid UTF-8")]
    InvalidUtf8,

    /// A variable-length integer ran past its maximum width
    #[error("Variable-length integer exceeded {max_bytes} bytes")]
    VarIntOverflow { max_bytes: usize },

    /// A length prefix was larger than the bytes actually present
    #[error("Length prefix {length} exceeds {remaining} remaining bytes")]
    LengthOverflow { length: usize, remaining: usize },
}
