//! DNS header codec
//!
//! The header is a fixed 12-byte record at the start of every message:
//!
//! ```text
//! 0       2       4        6        8        10       12
//! +--ID---+-FLAGS-+-QDCOUNT+-ANCOUNT+-NSCOUNT+-ARCOUNT+
//! ```
//!
//! The two flag bytes are bit-packed:
//!
//! ```text
//! byte 2:  QR(1) OPCODE(4) AA(1) TC(1) RD(1)
//! byte 3:  RA(1) Z(3) RCODE(4)
//! ```
//!
//! All multi-byte fields are big-endian (network byte order).

use super::error::{CodecError, CodecResult};

/// Size of the fixed DNS header in bytes
pub const HEADER_LEN: usize = 12;

/// Decoded DNS header
///
/// Constructed once per request and immutable after that; the count fields
/// must match the number of records actually serialized in each section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    /// Transaction ID, echoed from the request into the response
    pub id: u16,
    /// Query (false) or response (true)
    pub qr: bool,
    /// Operation code (4 bits; wider values are masked on encode)
    pub opcode: u8,
    /// Authoritative answer
    pub aa: bool,
    /// Truncated
    pub tc: bool,
    /// Recursion desired
    pub rd: bool,
    /// Recursion available
    pub ra: bool,
    /// Reserved, must be zero (3 bits)
    pub z: u8,
    /// Response code (4 bits; wider values are masked on encode)
    pub rcode: u8,
    /// Number of questions
    pub qdcount: u16,
    /// Number of answers
    pub ancount: u16,
    /// Number of authority records
    pub nscount: u16,
    /// Number of additional records
    pub arcount: u16,
}

impl Header {
    /// Encode the header into its 12-byte wire form
    ///
    /// Never fails. `opcode` and `rcode` are 4-bit fields and `z` is 3 bits;
    /// wider values are silently masked down — keeping them in range is the
    /// caller's responsibility.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];

        buf[..2].copy_from_slice(&self.id.to_be_bytes());

        let mut flags_hi = 0u8;
        flags_hi |= u8::from(self.qr) << 7;
        flags_hi |= (self.opcode & 0x0f) << 3;
        flags_hi |= u8::from(self.aa) << 2;
        flags_hi |= u8::from(self.tc) << 1;
        flags_hi |= u8::from(self.rd);
        buf[2] = flags_hi;

        let mut flags_lo = 0u8;
        flags_lo |= u8::from(self.ra) << 7;
        flags_lo |= (self.z & 0x07) << 4;
        flags_lo |= self.rcode & 0x0f;
        buf[3] = flags_lo;

        buf[4..6].copy_from_slice(&self.qdcount.to_be_bytes());
        buf[6..8].copy_from_slice(&self.ancount.to_be_bytes());
        buf[8..10].copy_from_slice(&self.nscount.to_be_bytes());
        buf[10..12].copy_from_slice(&self.arcount.to_be_bytes());

        buf
    }

    /// Decode a header from the start of `buf`
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedInput`] if fewer than 12 bytes are
    /// supplied.
    pub fn decode(buf: &[u8]) -> CodecResult<Self> {
        if buf.len() < HEADER_LEN {
            return Err(CodecError::MalformedInput {
                expected: HEADER_LEN,
                actual: buf.len(),
            });
        }

        let flags_hi = buf[2];
        let flags_lo = buf[3];

        Ok(Self {
            id: u16::from_be_bytes([buf[0], buf[1]]),
            qr: flags_hi & 0x80 != 0,
            opcode: (flags_hi >> 3) & 0x0f,
            aa: flags_hi & 0x04 != 0,
            tc: flags_hi & 0x02 != 0,
            rd: flags_hi & 0x01 != 0,
            ra: flags_lo & 0x80 != 0,
            z: (flags_lo >> 4) & 0x07,
            rcode: flags_lo & 0x0f,
            qdcount: u16::from_be_bytes([buf[4], buf[5]]),
            ancount: u16::from_be_bytes([buf[6], buf[7]]),
            nscount: u16::from_be_bytes([buf[8], buf[9]]),
            arcount: u16::from_be_bytes([buf[10], buf[11]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Header {
        Header {
            id: 0x04d2,
            qr: true,
            opcode: 0,
            aa: false,
            tc: false,
            rd: true,
            ra: false,
            z: 0,
            rcode: 0,
            qdcount: 1,
            ancount: 1,
            nscount: 0,
            arcount: 0,
        }
    }

    #[test]
    fn test_encode_known_bytes() {
        // Standard query header: ID=0x1234, RD set, one question
        let header = Header {
            id: 0x1234,
            rd: true,
            qdcount: 1,
            ..Header::default()
        };
        assert_eq!(
            header.encode(),
            [0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_encode_response_flags() {
        let bytes = sample_header().encode();
        // QR<<7 | RD = 0x81
        assert_eq!(bytes[2], 0x81);
        assert_eq!(bytes[3], 0x00);
        assert_eq!(&bytes[..2], &[0x04, 0xd2]);
    }

    #[test]
    fn test_encode_packs_all_flag_bits() {
        let header = Header {
            id: 0xffff,
            qr: true,
            opcode: 0x0f,
            aa: true,
            tc: true,
            rd: true,
            ra: true,
            z: 0x07,
            rcode: 0x0f,
            ..Header::default()
        };
        let bytes = header.encode();
        assert_eq!(bytes[2], 0xff);
        assert_eq!(bytes[3], 0xff);
    }

    #[test]
    fn test_encode_masks_wide_fields() {
        // opcode and rcode are 4-bit fields; wider values must not bleed
        // into neighboring bits
        let header = Header {
            opcode: 0x1f,
            rcode: 0x1f,
            z: 0x0f,
            ..Header::default()
        };
        let decoded = Header::decode(&header.encode()).unwrap();
        assert_eq!(decoded.opcode, 0x0f);
        assert_eq!(decoded.rcode, 0x0f);
        assert_eq!(decoded.z, 0x07);
        assert!(!decoded.qr);
    }

    #[test]
    fn test_round_trip() {
        let header = sample_header();
        let decoded = Header::decode(&header.encode()).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_round_trip_counts() {
        let header = Header {
            qdcount: 0x0102,
            ancount: 0x0304,
            nscount: 0x0506,
            arcount: 0x0708,
            ..Header::default()
        };
        let decoded = Header::decode(&header.encode()).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_decode_short_buffer() {
        // Scenario: a 10-byte buffer must fail, not read garbage
        let err = Header::decode(&[0u8; 10]).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedInput {
                expected: HEADER_LEN,
                actual: 10
            }
        );
    }

    #[test]
    fn test_decode_empty_buffer() {
        let err = Header::decode(&[]).unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut buf = sample_header().encode().to_vec();
        buf.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let decoded = Header::decode(&buf).unwrap();
        assert_eq!(decoded, sample_header());
    }
}
