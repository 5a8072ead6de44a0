//! DNS request responder
//!
//! The bytes-in/bytes-out transform between the socket and the codec:
//! decode the query, build the policy-driven response, encode it. Stateless
//! and side-effect-free, so one instance can serve any number of concurrent
//! callers.

use tracing::trace;

use crate::codec::{build_response, CodecResult, Query, ResponsePolicy};

/// Turns a query datagram into a response datagram using a fixed policy
#[derive(Debug, Clone)]
pub struct Responder {
    policy: ResponsePolicy,
}

impl Responder {
    /// Create a responder with the given answer policy
    #[must_use]
    pub fn new(policy: ResponsePolicy) -> Self {
        Self { policy }
    }

    /// The policy this responder answers with
    #[must_use]
    pub fn policy(&self) -> &ResponsePolicy {
        &self.policy
    }

    /// Process one query datagram and return the reply bytes
    ///
    /// # Errors
    ///
    /// Returns the codec error if the datagram cannot be decoded or the
    /// reply cannot be encoded. The caller decides what to do with a bad
    /// datagram; this responder never fabricates a reply for one.
    pub fn respond(&self, datagram: &[u8]) -> CodecResult<Vec<u8>> {
        let query = Query::decode(datagram)?;
        trace!(
            id = query.header.id,
            name = %query.question.name,
            qtype = query.question.qtype,
            "decoded query"
        );
        build_response(&query, &self.policy).encode()
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(ResponsePolicy::default())
    }
}
