//! Message assembly
//!
//! A message on the wire is header, then question, then answer, in that
//! fixed order — the encoder concatenates the section byte ranges and the
//! decoder slices them back apart. Building a response from a decoded query
//! is a pure, stateless transform: each datagram is processed independently
//! with no memory of prior datagrams.

use std::net::Ipv4Addr;

use super::answer::Answer;
use super::error::CodecResult;
use super::header::{Header, HEADER_LEN};
use super::question::Question;
use super::{CLASS_IN, TYPE_A};

/// A decoded query: header plus its question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// The request header
    pub header: Header,
    /// The first (and, for this responder, only) question
    pub question: Question,
}

impl Query {
    /// Decode a query datagram
    ///
    /// Reads the header and the question that follows it. Requests carrying
    /// more than one question are answered for the first one only.
    ///
    /// # Errors
    ///
    /// Propagates header and question codec errors. A header-only datagram
    /// fails when the question parse runs off the end of the buffer.
    pub fn decode(buf: &[u8]) -> CodecResult<Self> {
        let header = Header::decode(buf)?;
        let (question, _) = Question::decode(buf, HEADER_LEN)?;
        Ok(Self { header, question })
    }
}

/// The fixed response policy the server loop supplies to the assembler
///
/// Record type, class, TTL, and the substituted address are external policy
/// inputs, not values the codec computes — keeping them here keeps the
/// codec policy-free and testable in isolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePolicy {
    /// Record type for the synthesized answer
    pub rtype: u16,
    /// Record class for the synthesized answer
    pub rclass: u16,
    /// TTL in seconds for the synthesized answer
    pub ttl: u32,
    /// The fixed IPv4 address substituted as RDATA
    pub address: Ipv4Addr,
}

impl Default for ResponsePolicy {
    fn default() -> Self {
        Self {
            rtype: TYPE_A,
            rclass: CLASS_IN,
            ttl: 60,
            address: Ipv4Addr::new(8, 8, 8, 8),
        }
    }
}

/// A full message: the ordered composition exchanged over the socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message header
    pub header: Header,
    /// Question section (one record)
    pub question: Question,
    /// Answer section (one record)
    pub answer: Answer,
}

impl Message {
    /// Size of the encoded form in bytes
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.question.encoded_len() + self.answer.encoded_len()
    }

    /// Serialize header, question, and answer into one outbound buffer
    ///
    /// The buffer is sized up front from the computed section lengths.
    ///
    /// # Errors
    ///
    /// Propagates question and answer codec errors.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.header.encode());
        out.extend_from_slice(&self.question.encode()?);
        out.extend_from_slice(&self.answer.encode()?);
        Ok(out)
    }

    /// Slice an inbound buffer into its header, question, and answer
    ///
    /// # Errors
    ///
    /// Propagates the section codecs' errors.
    pub fn decode(buf: &[u8]) -> CodecResult<Self> {
        let header = Header::decode(buf)?;
        let (question, question_len) = Question::decode(buf, HEADER_LEN)?;
        let (answer, _) = Answer::decode(buf, HEADER_LEN + question_len)?;
        Ok(Self {
            header,
            question,
            answer,
        })
    }
}

/// Build the response message for a decoded query
///
/// The response header echoes the query's transaction ID, sets QR to
/// response and QDCOUNT/ANCOUNT to 1, and leaves every other flag and count
/// at zero (RCODE stays at no-error). The question is echoed back and the
/// answer reuses its name, with type, class, TTL, and RDATA taken from the
/// policy.
#[must_use]
pub fn build_response(query: &Query, policy: &ResponsePolicy) -> Message {
    let header = Header {
        id: query.header.id,
        qr: true,
        qdcount: 1,
        ancount: 1,
        ..Header::default()
    };

    let question = query.question.clone();
    let rdata = policy.address.octets().to_vec();
    let answer = Answer {
        name: question.name.clone(),
        rtype: policy.rtype,
        rclass: policy.rclass,
        ttl: policy.ttl,
        rdlength: rdata.len() as u16,
        rdata,
    };

    Message {
        header,
        question,
        answer,
    }
}

#[cfg(test)]
mod tests {
    use super::super::error::CodecError;
    use super::super::name::DomainName;
    use super::*;

    fn scenario_query() -> Query {
        Query {
            header: Header {
                id: 0x04d2,
                qdcount: 1,
                ..Header::default()
            },
            question: Question {
                name: DomainName::from_dotted("codecrafters.io"),
                qtype: TYPE_A,
                qclass: CLASS_IN,
            },
        }
    }

    // ========================================================================
    // Query Decoding Tests
    // ========================================================================

    #[test]
    fn test_query_decode() {
        let mut buf = scenario_query().header.encode().to_vec();
        buf.extend_from_slice(&scenario_query().question.encode().unwrap());

        let query = Query::decode(&buf).unwrap();
        assert_eq!(query, scenario_query());
    }

    #[test]
    fn test_query_decode_short_header() {
        assert_eq!(
            Query::decode(&[0u8; 10]).unwrap_err(),
            CodecError::MalformedInput {
                expected: HEADER_LEN,
                actual: 10
            }
        );
    }

    #[test]
    fn test_query_decode_header_only() {
        // 12 bytes with no question section behind them
        let buf = Header::default().encode();
        let err = Query::decode(&buf).unwrap_err();
        assert_eq!(err, CodecError::TruncatedName { offset: HEADER_LEN });
    }

    #[test]
    fn test_query_decode_first_question_wins() {
        // Two questions on the wire; only the first is read
        let mut buf = Header {
            id: 7,
            qdcount: 2,
            ..Header::default()
        }
        .encode()
        .to_vec();
        buf.extend_from_slice(
            &Question {
                name: DomainName::from_dotted("first.example"),
                qtype: TYPE_A,
                qclass: CLASS_IN,
            }
            .encode()
            .unwrap(),
        );
        buf.extend_from_slice(
            &Question {
                name: DomainName::from_dotted("second.example"),
                qtype: TYPE_A,
                qclass: CLASS_IN,
            }
            .encode()
            .unwrap(),
        );

        let query = Query::decode(&buf).unwrap();
        assert_eq!(query.question.name.to_string(), "first.example");
    }

    // ========================================================================
    // Response Assembly Tests
    // ========================================================================

    #[test]
    fn test_build_response_scenario() {
        // Query {ID:0x04D2, QR:0, QDCOUNT:1} for codecrafters.io A/IN must
        // produce {ID:0x04D2, QR:1, QDCOUNT:1, ANCOUNT:1} with the echoed
        // question and a fixed 8.8.8.8 answer with TTL 60
        let response = build_response(&scenario_query(), &ResponsePolicy::default());

        assert_eq!(response.header.id, 0x04d2);
        assert!(response.header.qr);
        assert_eq!(response.header.qdcount, 1);
        assert_eq!(response.header.ancount, 1);
        assert_eq!(response.header.nscount, 0);
        assert_eq!(response.header.arcount, 0);
        assert_eq!(response.header.rcode, 0);
        assert!(!response.header.aa);
        assert!(!response.header.rd);

        assert_eq!(response.question, scenario_query().question);

        assert_eq!(response.answer.name.to_string(), "codecrafters.io");
        assert_eq!(response.answer.rtype, TYPE_A);
        assert_eq!(response.answer.rclass, CLASS_IN);
        assert_eq!(response.answer.ttl, 60);
        assert_eq!(response.answer.rdlength, 4);
        assert_eq!(response.answer.rdata, vec![0x08, 0x08, 0x08, 0x08]);
    }

    #[test]
    fn test_build_response_uses_policy() {
        let policy = ResponsePolicy {
            ttl: 3600,
            address: Ipv4Addr::new(203, 0, 113, 9),
            ..ResponsePolicy::default()
        };
        let response = build_response(&scenario_query(), &policy);
        assert_eq!(response.answer.ttl, 3600);
        assert_eq!(response.answer.rdata, vec![203, 0, 113, 9]);
    }

    #[test]
    fn test_build_response_ignores_request_flags() {
        // RD and a nonzero opcode in the request do not leak into the reply
        let mut query = scenario_query();
        query.header.rd = true;
        query.header.opcode = 2;
        let response = build_response(&query, &ResponsePolicy::default());
        assert!(!response.header.rd);
        assert_eq!(response.header.opcode, 0);
    }

    // ========================================================================
    // Message Encoding Tests
    // ========================================================================

    #[test]
    fn test_encode_section_order() {
        // Header bytes first, question next, answer last; any other
        // ordering violates the wire contract
        let message = build_response(&scenario_query(), &ResponsePolicy::default());
        let bytes = message.encode().unwrap();

        assert_eq!(bytes.len(), message.encoded_len());
        assert_eq!(bytes[..HEADER_LEN], message.header.encode());

        let question_bytes = message.question.encode().unwrap();
        let question_end = HEADER_LEN + question_bytes.len();
        assert_eq!(bytes[HEADER_LEN..question_end], question_bytes[..]);
        assert_eq!(
            bytes[question_end..],
            message.answer.encode().unwrap()[..]
        );
    }

    #[test]
    fn test_message_round_trip() {
        let message = build_response(&scenario_query(), &ResponsePolicy::default());
        let decoded = Message::decode(&message.encode().unwrap()).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_message_decode_truncated_answer() {
        let message = build_response(&scenario_query(), &ResponsePolicy::default());
        let mut bytes = message.encode().unwrap();
        bytes.truncate(bytes.len() - 3);
        let err = Message::decode(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::TruncatedAnswer { .. }));
    }

    #[test]
    fn test_build_response_is_stateless() {
        // Same input, same output; no memory between datagrams
        let policy = ResponsePolicy::default();
        let first = build_response(&scenario_query(), &policy);
        let second = build_response(&scenario_query(), &policy);
        assert_eq!(first, second);
    }
}
