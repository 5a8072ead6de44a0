//! UDP server loop and request responder
//!
//! The thin transport wrapper around the codec: [`Responder`] is the pure
//! request-to-response transform, [`UdpServer`] owns the socket and feeds
//! it one datagram at a time.

pub mod responder;
pub mod udp;

pub use responder::Responder;
pub use udp::{UdpServer, UdpServerStats, UdpServerStatsSnapshot, MAX_UDP_MESSAGE_SIZE};
