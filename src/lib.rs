//! authdns: Minimal authoritative DNS responder
//!
//! This crate answers DNS queries over UDP with a single fixed address
//! record. The core is a hand-rolled RFC 1035 wire codec — header, name,
//! question, and answer sections — with the socket loop as a thin wrapper
//! around it.
//!
//! # Features
//!
//! - **Wire codec**: bit-exact header packing, length-prefixed name labels,
//!   question/answer framing, all big-endian
//! - **Compression rejection**: pointer bytes fail decoding explicitly
//!   instead of being misread as label lengths
//! - **Fixed-answer policy**: record type, class, TTL, and address come from
//!   configuration, not constants baked into the codec
//! - **Per-datagram isolation**: a malformed query or failed send never
//!   stops the loop
//!
//! # Architecture
//!
//! ```text
//! Client → UDP socket → codec (decode query)
//!                          ↓
//!                    build response
//!                          ↓
//!          UDP socket ← codec (encode reply)
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use authdns::codec::ResponsePolicy;
//! use authdns::server::{Responder, UdpServer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let responder = Arc::new(Responder::new(ResponsePolicy::default()));
//! let server = UdpServer::bind("127.0.0.1:2053".parse()?, responder, 512).await?;
//! server.run().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`codec`]: DNS message encoding and decoding (the core)
//! - [`config`]: Configuration types and loading
//! - [`error`]: Configuration and server error types
//! - [`server`]: UDP socket loop and responder

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod codec;
pub mod config;
pub mod error;
pub mod server;

// Re-export commonly used types at the crate root
pub use codec::{
    build_response, Answer, CodecError, DomainName, Header, Message, Query, Question,
    ResponsePolicy,
};
pub use config::{load_config, Config, ListenConfig};
pub use error::{ConfigError, ServerError};
pub use server::{Responder, UdpServer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
