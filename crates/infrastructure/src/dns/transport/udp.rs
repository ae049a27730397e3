//! UDP transport for iterative queries (RFC 1035 §4.2.1).
//!
//! One socket is bound for the life of the transport and reused for every
//! exchange. Replies are not demultiplexed: the first datagram from the
//! queried server is taken as the answer, and id matching is left to the
//! caller.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use rootwalk_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Receive buffer size. Larger than any classic UDP DNS message.
const MAX_UDP_RESPONSE_SIZE: usize = 8192;

pub struct UdpTransport {
    socket: UdpSocket,
    timeout: Duration,
}

impl UdpTransport {
    pub async fn bind(bind_addr: SocketAddr, timeout: Duration) -> Result<Self, DomainError> {
        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to bind UDP socket on {}: {}", bind_addr, e))
        })?;

        debug!(local = ?socket.local_addr().ok(), "UDP socket bound");

        Ok(Self { socket, timeout })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::IoError(e.to_string()))
    }

    async fn recv_from_server(
        &self,
        server: SocketAddr,
        buf: &mut [u8],
    ) -> Result<(usize, SocketAddr), DomainError> {
        loop {
            let (len, from) = self.socket.recv_from(buf).await.map_err(|e| {
                DomainError::Unreachable {
                    server: server.ip().to_string(),
                    reason: e.to_string(),
                }
            })?;

            if from.ip() == server.ip() {
                return Ok((len, from));
            }

            warn!(
                expected = %server,
                received_from = %from,
                "Dropping UDP datagram from unexpected source"
            );
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        server: SocketAddr,
        message_bytes: &[u8],
    ) -> Result<TransportResponse, DomainError> {
        let bytes_sent = self
            .socket
            .send_to(message_bytes, server)
            .await
            .map_err(|e| DomainError::Unreachable {
                server: server.ip().to_string(),
                reason: e.to_string(),
            })?;

        debug!(server = %server, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from) =
            tokio::time::timeout(self.timeout, self.recv_from_server(server, &mut recv_buf))
                .await
                .map_err(|_| DomainError::QueryTimeout {
                    server: server.ip().to_string(),
                })??;

        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received, "UDP response received");

        Ok(TransportResponse {
            bytes: recv_buf,
            from,
        })
    }
}
