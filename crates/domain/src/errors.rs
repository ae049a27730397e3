use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Failed to encode DNS query: {0}")]
    QueryEncoding(String),

    #[error("Unmatched transaction: sent id {expected}, received id {received}")]
    TransactionMismatch { expected: u16, received: u16 },

    #[error("Name server {server} could not answer query ({rcode}); the domain '{domain}' may not exist")]
    ServerError {
        server: String,
        domain: String,
        rcode: String,
    },

    #[error("No nameserver found for {0}")]
    NoNameserver(String),

    #[error("Query timeout waiting for {server}")]
    QueryTimeout { server: String },

    #[error("Name server {server} unreachable: {reason}")]
    Unreachable { server: String, reason: String },

    #[error("Resolution limit exceeded: {0}")]
    ResolutionLimitExceeded(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
