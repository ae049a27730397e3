use super::RecordType;

/// A resource record as handed over by the message codec: owner name,
/// type, TTL and the textual form of its data (dotted IPv4 for `A`, the
/// target host name for `NS` and `CNAME`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,

    pub record_type: RecordType,

    pub ttl: u32,

    pub data: String,
}

impl ResourceRecord {
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        ttl: u32,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            data: data.into(),
        }
    }

    pub fn a(name: &str, ttl: u32, address: &str) -> Self {
        Self::new(fqdn(name), RecordType::A, ttl, address)
    }

    pub fn ns(zone: &str, ttl: u32, host: &str) -> Self {
        Self::new(fqdn(zone), RecordType::NS, ttl, fqdn(host))
    }

    pub fn cname(name: &str, ttl: u32, target: &str) -> Self {
        Self::new(fqdn(name), RecordType::CNAME, ttl, fqdn(target))
    }
}

/// Appends the trailing root dot if `name` lacks one. The empty string is
/// left alone: it is the lookup key of the root hint.
pub fn fqdn(name: &str) -> String {
    if name.is_empty() || name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}
