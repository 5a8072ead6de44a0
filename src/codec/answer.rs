//! Answer record codec
//!
//! An answer is a name followed by type, class (16-bit each), TTL (32-bit),
//! RDLENGTH (16-bit), and RDLENGTH bytes of RDATA, all big-endian. For an
//! address record the RDATA is exactly the four bytes of an IPv4 address in
//! network byte order.

use std::net::Ipv4Addr;

use super::error::{CodecError, CodecResult};
use super::name::DomainName;
use super::{CLASS_IN, TYPE_A};

/// Bytes of type + class + TTL + RDLENGTH after the name
const FIXED_LEN: usize = 10;

/// One answer record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// The name this record answers for
    pub name: DomainName,
    /// Record type
    pub rtype: u16,
    /// Record class
    pub rclass: u16,
    /// Time to live in seconds
    pub ttl: u32,
    /// Declared length of the resource data; must equal `rdata.len()`
    pub rdlength: u16,
    /// The resource data itself
    pub rdata: Vec<u8>,
}

impl Answer {
    /// Build an address record for `name` pointing at `address`
    ///
    /// RDLENGTH is computed from the data, so the length invariant holds by
    /// construction.
    #[must_use]
    pub fn a_record(name: DomainName, ttl: u32, address: Ipv4Addr) -> Self {
        let rdata = address.octets().to_vec();
        Self {
            name,
            rtype: TYPE_A,
            rclass: CLASS_IN,
            ttl,
            rdlength: rdata.len() as u16,
            rdata,
        }
    }

    /// Size of the encoded form in bytes
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.name.encoded_len() + FIXED_LEN + self.rdata.len()
    }

    /// Encode into wire form
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LengthMismatch`] if the declared RDLENGTH
    /// disagrees with the actual RDATA byte count, and propagates name
    /// codec errors.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        if self.rdlength as usize != self.rdata.len() {
            return Err(CodecError::LengthMismatch {
                declared: self.rdlength as usize,
                actual: self.rdata.len(),
            });
        }

        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.name.encode()?);
        out.extend_from_slice(&self.rtype.to_be_bytes());
        out.extend_from_slice(&self.rclass.to_be_bytes());
        out.extend_from_slice(&self.ttl.to_be_bytes());
        out.extend_from_slice(&self.rdlength.to_be_bytes());
        out.extend_from_slice(&self.rdata);
        Ok(out)
    }

    /// Decode an answer starting at `offset`, returning it and the number
    /// of bytes consumed
    ///
    /// # Errors
    ///
    /// Propagates name codec errors; returns [`CodecError::TruncatedAnswer`]
    /// if the buffer ends before the fixed fields or before the declared
    /// RDATA length is satisfied.
    pub fn decode(buf: &[u8], offset: usize) -> CodecResult<(Self, usize)> {
        let (name, name_len) = DomainName::decode(buf, offset)?;
        let fixed = offset + name_len;
        if fixed + FIXED_LEN > buf.len() {
            return Err(CodecError::TruncatedAnswer { offset: fixed });
        }

        let rtype = u16::from_be_bytes([buf[fixed], buf[fixed + 1]]);
        let rclass = u16::from_be_bytes([buf[fixed + 2], buf[fixed + 3]]);
        let ttl = u32::from_be_bytes([
            buf[fixed + 4],
            buf[fixed + 5],
            buf[fixed + 6],
            buf[fixed + 7],
        ]);
        let rdlength = u16::from_be_bytes([buf[fixed + 8], buf[fixed + 9]]);

        let data_start = fixed + FIXED_LEN;
        let data_end = data_start + rdlength as usize;
        if data_end > buf.len() {
            return Err(CodecError::TruncatedAnswer { offset: data_start });
        }

        Ok((
            Self {
                name,
                rtype,
                rclass,
                ttl,
                rdlength,
                rdata: buf[data_start..data_end].to_vec(),
            },
            name_len + FIXED_LEN + rdlength as usize,
        ))
    }
}
