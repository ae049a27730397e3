use async_trait::async_trait;
use rootwalk_application::ports::NameServerClient;
use rootwalk_domain::{fqdn, DomainError, RecordType, ResourceRecord};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentQuery {
    pub domain: String,
    pub server: Ipv4Addr,
}

type Reply = Result<Vec<ResourceRecord>, DomainError>;

/// Scripted nameserver network: one reply per (domain, server) pair.
/// Unscripted pairs time out.
#[derive(Clone, Default)]
pub struct MockNameServerClient {
    replies: Arc<RwLock<HashMap<(String, Ipv4Addr), Reply>>>,
    sent: Arc<RwLock<Vec<SentQuery>>>,
}

impl MockNameServerClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_records(&self, domain: &str, server: Ipv4Addr, records: Vec<ResourceRecord>) {
        self.replies
            .write()
            .unwrap()
            .insert((fqdn(domain), server), Ok(records));
    }

    pub fn set_error(&self, domain: &str, server: Ipv4Addr, error: DomainError) {
        self.replies
            .write()
            .unwrap()
            .insert((fqdn(domain), server), Err(error));
    }

    pub fn sent(&self) -> Vec<SentQuery> {
        self.sent.read().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.sent.read().unwrap().len()
    }
}

#[async_trait]
impl NameServerClient for MockNameServerClient {
    async fn query(
        &self,
        domain: &str,
        _record_type: RecordType,
        server: Ipv4Addr,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        self.sent.write().unwrap().push(SentQuery {
            domain: fqdn(domain),
            server,
        });

        self.replies
            .read()
            .unwrap()
            .get(&(fqdn(domain), server))
            .cloned()
            .unwrap_or_else(|| {
                Err(DomainError::QueryTimeout {
                    server: server.to_string(),
                })
            })
    }
}
