#![allow(dead_code)]
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct MockRecord {
    owner: String,
    rtype: u16,
    ttl: u32,
    rdata: Vec<u8>,
}

impl MockRecord {
    pub fn a(owner: &str, ttl: u32, ip: Ipv4Addr) -> Self {
        Self {
            owner: owner.to_string(),
            rtype: 1,
            ttl,
            rdata: ip.octets().to_vec(),
        }
    }

    pub fn ns(zone: &str, ttl: u32, host: &str) -> Self {
        Self {
            owner: zone.to_string(),
            rtype: 2,
            ttl,
            rdata: encode_name(host),
        }
    }

    pub fn cname(owner: &str, ttl: u32, target: &str) -> Self {
        Self {
            owner: owner.to_string(),
            rtype: 5,
            ttl,
            rdata: encode_name(target),
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&encode_name(&self.owner));
        out.extend_from_slice(&self.rtype.to_be_bytes());
        out.extend_from_slice(&1u16.to_be_bytes());
        out.extend_from_slice(&self.ttl.to_be_bytes());
        out.extend_from_slice(&(self.rdata.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.rdata);
    }
}

/// What the mock sends back for one question name.
#[derive(Debug, Clone, Default)]
pub struct MockReply {
    rcode: u8,
    answers: Vec<MockRecord>,
    authority: Vec<MockRecord>,
    additional: Vec<MockRecord>,
    wrong_id: bool,
    raw: Option<Vec<u8>>,
}

impl MockReply {
    pub fn answer(records: Vec<MockRecord>) -> Self {
        Self {
            answers: records,
            ..Self::default()
        }
    }

    pub fn referral(authority: Vec<MockRecord>, additional: Vec<MockRecord>) -> Self {
        Self {
            authority,
            additional,
            ..Self::default()
        }
    }

    pub fn rcode(rcode: u8) -> Self {
        Self {
            rcode,
            ..Self::default()
        }
    }

    pub fn raw(bytes: Vec<u8>) -> Self {
        Self {
            raw: Some(bytes),
            ..Self::default()
        }
    }

    pub fn with_wrong_id(mut self) -> Self {
        self.wrong_id = true;
        self
    }

    fn build(&self, query: &[u8]) -> Vec<u8> {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }

        let mut id = [query[0], query[1]];
        if self.wrong_id {
            id[1] ^= 0xff;
        }

        let mut response = Vec::with_capacity(512);
        response.extend_from_slice(&id);
        response.push(0x84);
        response.push(self.rcode & 0x0f);
        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&(self.answers.len() as u16).to_be_bytes());
        response.extend_from_slice(&(self.authority.len() as u16).to_be_bytes());
        response.extend_from_slice(&(self.additional.len() as u16).to_be_bytes());
        response.extend_from_slice(&query[12..]);

        for record in self
            .answers
            .iter()
            .chain(&self.authority)
            .chain(&self.additional)
        {
            record.write(&mut response);
        }

        response
    }
}

/// A query as the mock saw it on the wire.
#[derive(Debug, Clone)]
pub struct ReceivedQuery {
    pub name: String,
    pub flags: u8,
}

/// Scripted authoritative server on an ephemeral loopback port. Questions
/// with no scripted reply are left unanswered.
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedQuery>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(script: HashMap<String, MockReply>) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = received.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let query = &buf[..len];
                        if query.len() <= 12 {
                            continue;
                        }

                        let name = question_name(query);
                        log.lock().unwrap().push(ReceivedQuery {
                            name: name.clone(),
                            flags: query[2],
                        });

                        if let Some(reply) = script.get(&name) {
                            let _ = socket.send_to(&reply.build(query), peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn received(&self) -> Vec<ReceivedQuery> {
        self.received.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn encode_name(domain: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in domain.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Decodes the first question's name (uncompressed) as `a.b.c.`.
fn question_name(query: &[u8]) -> String {
    let mut name = String::new();
    let mut pos = 12;
    while let Some(&len) = query.get(pos) {
        if len == 0 {
            break;
        }
        let start = pos + 1;
        let end = (start + len as usize).min(query.len());
        name.push_str(&String::from_utf8_lossy(&query[start..end]));
        name.push('.');
        pos = end;
    }
    if name.is_empty() {
        name.push('.');
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_name_decoding() {
        let mut query = vec![0u8; 12];
        query.extend_from_slice(&encode_name("www.example.com."));
        query.extend_from_slice(&[0, 1, 0, 1]);

        assert_eq!(question_name(&query), "www.example.com.");
    }

    #[test]
    fn test_wrong_id_flips_low_byte() {
        let mut query = vec![0x12, 0x34, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0];
        query.extend_from_slice(&encode_name("example.com."));
        query.extend_from_slice(&[0, 1, 0, 1]);

        let response = MockReply::answer(vec![]).with_wrong_id().build(&query);

        assert_eq!(&response[0..2], &[0x12, 0xcb]);
    }
}
