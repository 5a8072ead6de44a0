//! Error types for the DNS wire codec
//!
//! Every decode or encode failure is returned to the immediate caller as a
//! typed result; nothing is swallowed or replaced with a default value. The
//! caller (normally the UDP server loop) decides what to do with a failure —
//! for a malformed datagram the policy is to drop it and keep serving.

use thiserror::Error;

/// Error types for DNS wire encoding and decoding
///
/// Each variant carries enough context (offsets, lengths) to pinpoint the
/// violation inside the buffer that produced it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Buffer too short for a fixed-size field
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    MalformedInput {
        /// Minimum number of bytes the field requires
        expected: usize,
        /// Number of bytes actually available
        actual: usize,
    },

    /// A name ended without its terminating zero byte
    #[error("name truncated: buffer ended at offset {offset} before the root label")]
    TruncatedName {
        /// Offset at which the next length byte was expected
        offset: usize,
    },

    /// A label length byte cannot be satisfied by the buffer
    #[error("invalid label length {length} at offset {offset}")]
    InvalidLabelLength {
        /// Offset of the offending length byte
        offset: usize,
        /// The length it declared
        length: usize,
    },

    /// A label exceeds the 63-byte wire limit
    #[error("label is {length} bytes, limit is 63")]
    LabelTooLong {
        /// Actual label length
        length: usize,
    },

    /// An encoded name exceeds the 255-byte wire limit
    #[error("encoded name is {length} bytes, limit is 255")]
    NameTooLong {
        /// Actual encoded length
        length: usize,
    },

    /// A compression pointer was encountered
    ///
    /// Pointer bytes have their two high bits set. They are deliberately not
    /// supported; failing loudly here keeps a pointer from ever being
    /// misread as a literal label length.
    #[error("name compression pointer at offset {offset} is not supported")]
    UnsupportedCompression {
        /// Offset of the pointer byte
        offset: usize,
    },

    /// A question ended before its type and class fields
    #[error("question truncated at offset {offset}: type and class missing")]
    TruncatedQuestion {
        /// Offset at which the fixed fields were expected
        offset: usize,
    },

    /// An answer ended before its fixed fields or declared RDATA
    #[error("answer truncated at offset {offset}")]
    TruncatedAnswer {
        /// Offset at which the missing bytes were expected
        offset: usize,
    },

    /// Declared RDATA length disagrees with the actual data
    #[error("declared RDATA length {declared} does not match actual length {actual}")]
    LengthMismatch {
        /// The RDLENGTH field value
        declared: usize,
        /// Byte count of the supplied RDATA
        actual: usize,
    },
}

impl CodecError {
    /// Check whether this error means the input simply ended too early
    ///
    /// Truncation errors point at short datagrams; the remaining kinds point
    /// at byte sequences that can never be valid regardless of length.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. }
                | Self::TruncatedName { .. }
                | Self::TruncatedQuestion { .. }
                | Self::TruncatedAnswer { .. }
        )
    }
}

/// Type alias for Result with [`CodecError`]
pub type CodecResult<T> = std::result::Result<T, CodecError>;
