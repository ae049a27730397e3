use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::DnsTransport;
use async_trait::async_trait;
use rootwalk_application::ports::NameServerClient;
use rootwalk_domain::{DomainError, RecordType, ResourceRecord};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Sends one question per call to an authoritative server over the given
/// transport and hands back every record of the reply.
pub struct UdpNameServerClient {
    transport: Arc<dyn DnsTransport>,
    port: u16,
}

impl UdpNameServerClient {
    pub fn new(transport: Arc<dyn DnsTransport>, port: u16) -> Self {
        Self { transport, port }
    }
}

#[async_trait]
impl NameServerClient for UdpNameServerClient {
    #[instrument(skip(self))]
    async fn query(
        &self,
        domain: &str,
        record_type: RecordType,
        server: Ipv4Addr,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let (id, query_bytes) = MessageBuilder::build_query_with_id(domain, &record_type)?;
        let server_addr = SocketAddr::new(IpAddr::V4(server), self.port);

        let response = self.transport.send(server_addr, &query_bytes).await?;
        debug!(from = %response.from, bytes = response.bytes.len(), "Reply received");

        let received = ResponseParser::transaction_id(&response.bytes)?;
        if received != id {
            warn!(expected = id, received, "Unmatched transaction");
            return Err(DomainError::TransactionMismatch {
                expected: id,
                received,
            });
        }

        let parsed = ResponseParser::parse(&response.bytes)?;
        if !parsed.is_success() {
            let rcode = ResponseParser::rcode_to_status(parsed.rcode);
            warn!(rcode, "Name server could not answer query");
            return Err(DomainError::ServerError {
                server: server.to_string(),
                domain: domain.to_string(),
                rcode: rcode.to_string(),
            });
        }

        if parsed.truncated {
            debug!("Response truncated, using the records that fit");
        }

        Ok(parsed.records)
    }
}
