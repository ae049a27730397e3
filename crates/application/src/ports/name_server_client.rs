use async_trait::async_trait;
use rootwalk_domain::{DomainError, RecordType, ResourceRecord};
use std::net::Ipv4Addr;

/// Port to a single authoritative nameserver: packs one question, sends it,
/// parses the reply and flattens the answer, authority and additional
/// sections (in that order) into one record list.
///
/// Implementations must fail with `TransactionMismatch` when the reply's id
/// differs from the query's, and with `ServerError` for any response code
/// other than NOERROR. No retries.
#[async_trait]
pub trait NameServerClient: Send + Sync {
    async fn query(
        &self,
        domain: &str,
        record_type: RecordType,
        server: Ipv4Addr,
    ) -> Result<Vec<ResourceRecord>, DomainError>;
}
