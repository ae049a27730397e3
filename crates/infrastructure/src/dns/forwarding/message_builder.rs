//! DNS query construction in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use rootwalk_domain::{DomainError, RecordType};
use std::str::FromStr;

/// Classic UDP payload limit; a single-question query always fits.
const MAX_QUERY_SIZE: u16 = 512;

/// Builds iterative (non-recursive) query messages.
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a single-question IN query with a random id and the RD flag
    /// cleared, returning the id alongside the wire bytes so the reply can
    /// be matched.
    pub fn build_query_with_id(
        domain: &str,
        record_type: &RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(false);
        message.add_query(query);

        let bytes = Self::serialize_message(&message, MAX_QUERY_SIZE)?;
        Ok((id, bytes))
    }

    fn serialize_message(message: &Message, max_size: u16) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(max_size as usize);
        let mut encoder = BinEncoder::new(&mut buf);
        encoder.set_max_size(max_size);

        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::QueryEncoding(e.to_string()))?;

        Ok(buf)
    }
}
