#![allow(dead_code)]
pub mod dns_server_mock;

pub use dns_server_mock::{MockDnsServer, MockRecord, MockReply};

use rootwalk_infrastructure::dns::transport::UdpTransport;
use rootwalk_infrastructure::dns::UdpNameServerClient;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

pub const LOOPBACK: Ipv4Addr = Ipv4Addr::LOCALHOST;

pub async fn client_for(server: &MockDnsServer, timeout: Duration) -> UdpNameServerClient {
    let transport = UdpTransport::bind("127.0.0.1:0".parse().unwrap(), timeout)
        .await
        .unwrap();
    UdpNameServerClient::new(Arc::new(transport), server.port())
}

pub fn script(entries: Vec<(&str, MockReply)>) -> std::collections::HashMap<String, MockReply> {
    entries
        .into_iter()
        .map(|(name, reply)| (name.to_string(), reply))
        .collect()
}
