//! Question record codec
//!
//! One question is a name followed by a 16-bit type and a 16-bit class,
//! both big-endian.

use super::error::{CodecError, CodecResult};
use super::name::DomainName;

/// Bytes of type + class after the name
const FIXED_LEN: usize = 4;

/// One question record: what is being asked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// The name being queried
    pub name: DomainName,
    /// Record type (1 for an address record)
    pub qtype: u16,
    /// Record class (1 for the Internet)
    pub qclass: u16,
}

impl Question {
    /// Size of the encoded form in bytes
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.name.encoded_len() + FIXED_LEN
    }

    /// Encode into wire form
    ///
    /// # Errors
    ///
    /// Returns the name codec's error if the name violates its limits.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.name.encode()?);
        out.extend_from_slice(&self.qtype.to_be_bytes());
        out.extend_from_slice(&self.qclass.to_be_bytes());
        Ok(out)
    }

    /// Decode a question starting at `offset`, returning it and the number
    /// of bytes consumed
    ///
    /// # Errors
    ///
    /// Propagates name codec errors; returns
    /// [`CodecError::TruncatedQuestion`] if fewer than 4 bytes remain after
    /// the name.
    pub fn decode(buf: &[u8], offset: usize) -> CodecResult<(Self, usize)> {
        let (name, name_len) = DomainName::decode(buf, offset)?;
        let fixed = offset + name_len;
        if fixed + FIXED_LEN > buf.len() {
            return Err(CodecError::TruncatedQuestion { offset: fixed });
        }

        let qtype = u16::from_be_bytes([buf[fixed], buf[fixed + 1]]);
        let qclass = u16::from_be_bytes([buf[fixed + 2], buf[fixed + 3]]);
        Ok((
            Self {
                name,
                qtype,
                qclass,
            },
            name_len + FIXED_LEN,
        ))
    }
}
