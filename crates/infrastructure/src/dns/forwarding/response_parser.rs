use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use rootwalk_domain::{DomainError, ResourceRecord};
use tracing::debug;

/// Fixed size of the DNS message header.
const HEADER_LEN: usize = 12;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Answer, authority and additional records, in that order.
    pub records: Vec<ResourceRecord>,
}

impl DnsResponse {
    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Reads the transaction id without decoding the rest of the message.
    pub fn transaction_id(response_bytes: &[u8]) -> Result<u16, DomainError> {
        if response_bytes.len() < HEADER_LEN {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response is {} bytes, shorter than a DNS header",
                response_bytes.len()
            )));
        }
        Ok(u16::from_be_bytes([response_bytes[0], response_bytes[1]]))
    }

    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let id = Self::transaction_id(response_bytes)?;
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let records: Vec<ResourceRecord> = message
            .answers()
            .iter()
            .chain(message.name_servers())
            .chain(message.additionals())
            .map(Self::to_resource_record)
            .collect();

        debug!(
            id,
            rcode = ?rcode,
            truncated,
            answers = message.answers().len(),
            authority = message.name_servers().len(),
            additional = message.additionals().len(),
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id,
            rcode,
            truncated,
            records,
        })
    }

    fn to_resource_record(record: &Record) -> ResourceRecord {
        let data = match record.data() {
            RData::A(a) => a.0.to_string(),
            RData::NS(ns) => ns.0.to_utf8(),
            RData::CNAME(canonical) => canonical.0.to_utf8(),
            other => other.to_string(),
        };

        ResourceRecord::new(
            record.name().to_utf8(),
            RecordTypeMapper::from_hickory(record.record_type()),
            record.ttl(),
            data,
        )
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
