//! Domain name codec
//!
//! On the wire a name is a sequence of length-prefixed labels terminated by
//! a zero byte:
//!
//! ```text
//! 0x0c c o d e c r a f t e r s 0x02 i o 0x00
//! ```
//!
//! Each label length occupies one byte and must stay in 0–63; the two high
//! bits of a length byte are reserved for compression pointers, which this
//! codec rejects outright rather than misreading as literal lengths. Labels
//! are always read through their length prefixes — no delimiter byte value
//! is ever special-cased.

use std::fmt;

use super::error::{CodecError, CodecResult};

/// Maximum length of a single label in bytes
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum length of a whole encoded name, terminator included
pub const MAX_NAME_LEN: usize = 255;

/// A length byte with both high bits set is a compression pointer
const POINTER_MASK: u8 = 0b1100_0000;

/// A dot-separated hostname as an ordered sequence of labels
///
/// Value type with no sharing: produced by parsing a query and consumed when
/// building the matching question and answer records. Labels are expected to
/// be 1–63 byte ASCII strings; the length limits are enforced at encode
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainName {
    labels: Vec<String>,
}

impl DomainName {
    /// Create a name from a list of labels
    #[must_use]
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Parse a dotted hostname such as `"codecrafters.io"`
    ///
    /// Empty labels (leading, trailing, or doubled dots) are discarded, so a
    /// trailing root dot is accepted.
    #[must_use]
    pub fn from_dotted(name: &str) -> Self {
        Self {
            labels: name
                .split('.')
                .filter(|label| !label.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// The labels in order
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Size of the encoded form in bytes, terminator included
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|label| 1 + label.len()).sum::<usize>() + 1
    }

    /// Encode into the length-prefixed wire form
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LabelTooLong`] if any label exceeds 63 bytes,
    /// or [`CodecError::NameTooLong`] if the encoded form exceeds 255 bytes.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        for label in &self.labels {
            if label.len() > MAX_LABEL_LEN {
                return Err(CodecError::LabelTooLong {
                    length: label.len(),
                });
            }
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
        out.push(0);

        if out.len() > MAX_NAME_LEN {
            return Err(CodecError::NameTooLong { length: out.len() });
        }
        Ok(out)
    }

    /// Decode a name starting at `offset`
    ///
    /// Returns the name and the number of bytes consumed, so the caller can
    /// advance past it inside a larger message.
    ///
    /// # Errors
    ///
    /// - [`CodecError::TruncatedName`] if the buffer ends before the zero
    ///   terminator
    /// - [`CodecError::UnsupportedCompression`] if a length byte has its two
    ///   high bits set
    /// - [`CodecError::InvalidLabelLength`] if a length byte cannot be a
    ///   literal label length or would read past the buffer
    /// - [`CodecError::NameTooLong`] if the wire form exceeds 255 bytes
    pub fn decode(buf: &[u8], offset: usize) -> CodecResult<(Self, usize)> {
        let mut labels = Vec::new();
        let mut pos = offset;

        loop {
            let len_byte = match buf.get(pos) {
                Some(&b) => b,
                None => return Err(CodecError::TruncatedName { offset: pos }),
            };

            if len_byte & POINTER_MASK == POINTER_MASK {
                return Err(CodecError::UnsupportedCompression { offset: pos });
            }
            if len_byte == 0 {
                pos += 1;
                break;
            }

            let length = len_byte as usize;
            // 0b01/0b10-prefixed bytes are reserved and can never be literal
            // lengths, which cap at 63
            if length > MAX_LABEL_LEN {
                return Err(CodecError::InvalidLabelLength {
                    offset: pos,
                    length,
                });
            }

            let start = pos + 1;
            let end = start + length;
            if end > buf.len() {
                return Err(CodecError::InvalidLabelLength {
                    offset: pos,
                    length,
                });
            }

            labels.push(String::from_utf8_lossy(&buf[start..end]).into_owned());
            pos = end;
        }

        let consumed = pos - offset;
        if consumed > MAX_NAME_LEN {
            return Err(CodecError::NameTooLong { length: consumed });
        }
        Ok((Self { labels }, consumed))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels.join("."))
    }
}
