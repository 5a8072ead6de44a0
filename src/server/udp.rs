//! UDP DNS server
//!
//! Owns the UDP socket and drives the responder: read one datagram, build
//! the reply, send it back to the originating address. Datagrams are
//! independent — a malformed request or a failed send affects only itself,
//! and the loop keeps serving.
//!
//! # Architecture
//!
//! ```text
//! UDP Socket (port 2053)
//!     |
//!     v
//! recv_from()
//!     |
//!     v
//! Responder::respond()
//!     |
//!     v
//! send_to()
//! ```

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::net::UdpSocket;
use tracing::{debug, error, info, trace, warn};

use super::responder::Responder;
use crate::error::{ServerError, ServerResult};

/// Conventional maximum DNS message size over UDP without EDNS
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;

/// Statistics for the UDP server
#[derive(Debug, Default)]
pub struct UdpServerStats {
    /// Total datagrams received
    packets_received: AtomicU64,
    /// Total replies sent
    packets_sent: AtomicU64,
    /// Replies lost to send failures
    packets_dropped: AtomicU64,
    /// Datagrams dropped as malformed
    parse_errors: AtomicU64,
    /// Total bytes received
    bytes_received: AtomicU64,
    /// Total bytes sent
    bytes_sent: AtomicU64,
}

impl UdpServerStats {
    /// Get total datagrams received
    #[must_use]
    pub fn packets_received(&self) -> u64 {
        self.packets_received.load(Ordering::Relaxed)
    }

    /// Get total replies sent
    #[must_use]
    pub fn packets_sent(&self) -> u64 {
        self.packets_sent.load(Ordering::Relaxed)
    }

    /// Get replies lost to send failures
    #[must_use]
    pub fn packets_dropped(&self) -> u64 {
        self.packets_dropped.load(Ordering::Relaxed)
    }

    /// Get datagrams dropped as malformed
    #[must_use]
    pub fn parse_errors(&self) -> u64 {
        self.parse_errors.load(Ordering::Relaxed)
    }

    /// Get total bytes received
    #[must_use]
    pub fn bytes_received(&self) -> u64 {
        self.bytes_received.load(Ordering::Relaxed)
    }

    /// Get total bytes sent
    #[must_use]
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all counters
    #[must_use]
    pub fn snapshot(&self) -> UdpServerStatsSnapshot {
        UdpServerStatsSnapshot {
            packets_received: self.packets_received(),
            packets_sent: self.packets_sent(),
            packets_dropped: self.packets_dropped(),
            parse_errors: self.parse_errors(),
            bytes_received: self.bytes_received(),
            bytes_sent: self.bytes_sent(),
        }
    }
}

/// Point-in-time copy of [`UdpServerStats`]
#[derive(Debug, Clone, Copy)]
pub struct UdpServerStatsSnapshot {
    /// Total datagrams received
    pub packets_received: u64,
    /// Total replies sent
    pub packets_sent: u64,
    /// Replies lost to send failures
    pub packets_dropped: u64,
    /// Datagrams dropped as malformed
    pub parse_errors: u64,
    /// Total bytes received
    pub bytes_received: u64,
    /// Total bytes sent
    pub bytes_sent: u64,
}

/// UDP DNS server
///
/// One request datagram in, one reply datagram out, no connection state
/// between datagrams.
pub struct UdpServer {
    /// Bound UDP socket
    socket: Arc<UdpSocket>,
    /// Query-to-reply transform
    responder: Arc<Responder>,
    /// Server statistics
    stats: Arc<UdpServerStats>,
    /// Shutdown flag
    shutdown: Arc<AtomicBool>,
    /// Local bind address
    local_addr: SocketAddr,
    /// Receive buffer size in bytes
    recv_buffer_len: usize,
}

impl UdpServer {
    /// Bind a new server to `addr`
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub async fn bind(
        addr: SocketAddr,
        responder: Arc<Responder>,
        recv_buffer_len: usize,
    ) -> ServerResult<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| ServerError::network_io(format!("failed to bind UDP socket to {addr}"), e))?;

        let local_addr = socket
            .local_addr()
            .map_err(|e| ServerError::network_io("failed to get local address", e))?;

        info!(addr = %local_addr, "UDP DNS responder bound");

        Ok(Self {
            socket: Arc::new(socket),
            responder,
            stats: Arc::new(UdpServerStats::default()),
            shutdown: Arc::new(AtomicBool::new(false)),
            local_addr,
            recv_buffer_len,
        })
    }

    /// Create a server from an existing socket
    ///
    /// Useful for testing or when the socket is created externally.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket's local address cannot be read.
    pub fn from_socket(socket: UdpSocket, responder: Arc<Responder>) -> ServerResult<Self> {
        let local_addr = socket
            .local_addr()
            .map_err(|e| ServerError::network_io("failed to get local address", e))?;

        Ok(Self {
            socket: Arc::new(socket),
            responder,
            stats: Arc::new(UdpServerStats::default()),
            shutdown: Arc::new(AtomicBool::new(false)),
            local_addr,
            recv_buffer_len: MAX_UDP_MESSAGE_SIZE,
        })
    }

    /// The address this server is bound to
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Server statistics
    #[must_use]
    pub fn stats(&self) -> &Arc<UdpServerStats> {
        &self.stats
    }

    /// Check if the server has been told to stop
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Signal the server to stop after the in-flight datagram
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Run the server until shutdown is signaled or a fatal error occurs
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal socket failures; per-datagram
    /// failures are logged and absorbed.
    pub async fn run(&self) -> ServerResult<()> {
        info!(addr = %self.local_addr, "UDP DNS responder starting");

        let mut recv_buf = vec![0u8; self.recv_buffer_len];
        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                info!("UDP DNS responder shutting down");
                break;
            }

            if let Err(e) = self.handle_one_packet(&mut recv_buf).await {
                if Self::is_fatal_error(&e) {
                    error!(error = %e, "fatal UDP error, shutting down");
                    return Err(e);
                }
                debug!(error = %e, "non-fatal UDP error");
            }
        }

        Ok(())
    }

    /// Run the server with a shutdown receiver
    ///
    /// # Errors
    ///
    /// Same as [`UdpServer::run`].
    pub async fn run_until_shutdown(
        &self,
        mut shutdown_rx: tokio::sync::oneshot::Receiver<()>,
    ) -> ServerResult<()> {
        info!(addr = %self.local_addr, "UDP DNS responder starting");

        let mut recv_buf = vec![0u8; self.recv_buffer_len];
        loop {
            tokio::select! {
                result = self.handle_one_packet(&mut recv_buf) => {
                    if let Err(e) = result {
                        if Self::is_fatal_error(&e) {
                            error!(error = %e, "fatal UDP error, shutting down");
                            return Err(e);
                        }
                        debug!(error = %e, "non-fatal UDP error");
                    }
                }
                _ = &mut shutdown_rx => {
                    info!("UDP DNS responder received shutdown signal");
                    self.shutdown.store(true, Ordering::SeqCst);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Receive one datagram, reply to it, update counters
    async fn handle_one_packet(&self, recv_buf: &mut [u8]) -> ServerResult<()> {
        let (len, src) = self
            .socket
            .recv_from(recv_buf)
            .await
            .map_err(|e| ServerError::network_io("UDP recv_from failed", e))?;

        self.stats.packets_received.fetch_add(1, Ordering::Relaxed);
        self.stats
            .bytes_received
            .fetch_add(len as u64, Ordering::Relaxed);

        trace!(src = %src, len, "received UDP datagram");

        // A malformed datagram is dropped, never answered and never fatal
        let reply = match self.responder.respond(&recv_buf[..len]) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.stats.parse_errors.fetch_add(1, Ordering::Relaxed);
                debug!(src = %src, error = %e, "dropping malformed query");
                return Ok(());
            }
        };

        match self.socket.send_to(&reply, src).await {
            Ok(sent) => {
                self.stats.packets_sent.fetch_add(1, Ordering::Relaxed);
                self.stats
                    .bytes_sent
                    .fetch_add(sent as u64, Ordering::Relaxed);
                trace!(dst = %src, len = sent, "sent UDP reply");
            }
            Err(e) => {
                self.stats.packets_dropped.fetch_add(1, Ordering::Relaxed);
                warn!(dst = %src, error = %e, "failed to send UDP reply");
            }
        }

        Ok(())
    }

    /// Check if an error should stop the server
    ///
    /// Fatal errors are the ones retrying cannot fix: permission problems,
    /// an address conflict, or memory exhaustion. Everything else keeps the
    /// loop alive.
    fn is_fatal_error(err: &ServerError) -> bool {
        match err {
            ServerError::Network { source, .. } => source.as_ref().is_some_and(|io_err| {
                matches!(
                    io_err.kind(),
                    io::ErrorKind::PermissionDenied
                        | io::ErrorKind::AddrInUse
                        | io::ErrorKind::OutOfMemory
                )
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_and_local_addr() {
        let server = UdpServer::bind(
            "127.0.0.1:0".parse().unwrap(),
            Arc::new(Responder::default()),
            MAX_UDP_MESSAGE_SIZE,
        )
        .await
        .unwrap();
        assert_eq!(server.local_addr().ip(), "127.0.0.1".parse::<std::net::IpAddr>().unwrap());
        assert_ne!(server.local_addr().port(), 0);
        assert!(!server.is_shutdown());
    }

    #[tokio::test]
    async fn test_from_socket() {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let local_addr = socket.local_addr().unwrap();
        let server = UdpServer::from_socket(socket, Arc::new(Responder::default())).unwrap();
        assert_eq!(server.local_addr(), local_addr);
    }

    #[tokio::test]
    async fn test_shutdown_flag() {
        let server = UdpServer::bind(
            "127.0.0.1:0".parse().unwrap(),
            Arc::new(Responder::default()),
            MAX_UDP_MESSAGE_SIZE,
        )
        .await
        .unwrap();
        assert!(!server.is_shutdown());
        server.shutdown();
        assert!(server.is_shutdown());
    }

    #[tokio::test]
    async fn test_run_until_shutdown_stops() {
        let server = Arc::new(
            UdpServer::bind(
                "127.0.0.1:0".parse().unwrap(),
                Arc::new(Responder::default()),
                MAX_UDP_MESSAGE_SIZE,
            )
            .await
            .unwrap(),
        );

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_clone = Arc::clone(&server);
        let handle = tokio::spawn(async move { server_clone.run_until_shutdown(shutdown_rx).await });

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        shutdown_tx.send(()).unwrap();

        let result = tokio::time::timeout(std::time::Duration::from_secs(1), handle).await;
        assert!(result.is_ok(), "server should have stopped");
        assert!(server.is_shutdown());
    }

    #[test]
    fn test_stats_default_zero() {
        let stats = UdpServerStats::default();
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.packets_received, 0);
        assert_eq!(snapshot.packets_sent, 0);
        assert_eq!(snapshot.packets_dropped, 0);
        assert_eq!(snapshot.parse_errors, 0);
    }

    #[test]
    fn test_is_fatal_error_classification() {
        let fatal = ServerError::network_io(
            "bind",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(UdpServer::is_fatal_error(&fatal));

        let fatal = ServerError::network_io("bind", io::Error::new(io::ErrorKind::AddrInUse, "in use"));
        assert!(UdpServer::is_fatal_error(&fatal));

        let transient = ServerError::network_io(
            "recv",
            io::Error::new(io::ErrorKind::ConnectionReset, "reset"),
        );
        assert!(!UdpServer::is_fatal_error(&transient));

        let sourceless = ServerError::network("no source");
        assert!(!UdpServer::is_fatal_error(&sourceless));
    }
}
