use rootwalk_domain::{fqdn, RecordType, ResourceRecord};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::ports::Clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub data: String,
    /// Unix seconds; the entry is live while `now < expires_at`.
    pub expires_at: u64,
}

impl CacheEntry {
    pub fn is_live(&self, now: u64) -> bool {
        now < self.expires_at
    }

    pub fn remaining_ttl(&self, now: u64) -> Option<u64> {
        self.is_live(now).then(|| self.expires_at - now)
    }
}

/// What a response batch told the resolver once it was ingested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheSignal {
    /// The batch led with an alias; resolution restarts at this target.
    Cname(String),
    /// A referral was stored; the payload is the nameserver host name.
    Ns(String),
    /// No referral. The caller checks the cache for a direct A answer.
    A,
}

/// One domain's entries, as shown by `.list`.
#[derive(Debug, Clone)]
pub struct CachedDomain {
    pub domain: String,
    pub entries: Vec<(RecordType, CacheEntry)>,
}

type EntrySet = SmallVec<[(RecordType, CacheEntry); 3]>;

/// Process-local record cache: domain name → record type → entry.
///
/// Expired entries are never evicted; they read as absent and linger until
/// overwritten, removed or cleared. Domains iterate in first-seen order.
pub struct RecordCache {
    root_server: Ipv4Addr,
    clock: Arc<dyn Clock>,
    order: Vec<String>,
    domains: FxHashMap<String, EntrySet>,
}

impl RecordCache {
    pub fn new(root_server: Ipv4Addr, clock: Arc<dyn Clock>) -> Self {
        Self {
            root_server,
            clock,
            order: Vec::new(),
            domains: FxHashMap::default(),
        }
    }

    pub fn root_server(&self) -> Ipv4Addr {
        self.root_server
    }

    pub fn now_secs(&self) -> u64 {
        self.clock.now_secs()
    }

    /// Ingests one response's records in order.
    ///
    /// A CNAME is stored and returned at once; records after it in the same
    /// batch are not looked at. An NS record only replaces a live NS for the
    /// same zone when its target already has a live A record, so a
    /// glue-backed delegation is not overwritten by a bare one.
    pub fn put(&mut self, records: &[ResourceRecord]) -> CacheSignal {
        let now = self.clock.now_secs();
        let mut referral: Option<String> = None;

        for record in records {
            let entry = CacheEntry {
                data: record.data.clone(),
                expires_at: now.saturating_add(u64::from(record.ttl)),
            };

            match record.record_type {
                RecordType::CNAME => {
                    debug!(name = %record.name, target = %record.data, "Caching CNAME");
                    self.store(&record.name, RecordType::CNAME, entry);
                    return CacheSignal::Cname(record.data.clone());
                }
                RecordType::A => {
                    self.store(&record.name, RecordType::A, entry);
                }
                RecordType::NS => {
                    let has_live_ns = self.live(&record.name, RecordType::NS, now).is_some();
                    let target_has_address = self.live(&record.data, RecordType::A, now).is_some();

                    if !has_live_ns || target_has_address {
                        self.store(&record.name, RecordType::NS, entry);
                        referral = Some(record.data.clone());
                    } else {
                        trace!(
                            zone = %record.name,
                            host = %record.data,
                            "Keeping existing NS, new target has no address"
                        );
                    }
                }
                RecordType::Other(code) => {
                    trace!(name = %record.name, record_type = code, "Ignoring record");
                }
            }
        }

        match referral {
            Some(host) => CacheSignal::Ns(host),
            None => CacheSignal::A,
        }
    }

    /// Live data for `(domain, record_type)`. `("", NS)` always yields the
    /// root server.
    pub fn get(&self, domain: &str, record_type: RecordType) -> Option<String> {
        if domain.is_empty() && record_type == RecordType::NS {
            return Some(self.root_server.to_string());
        }

        self.live(domain, record_type, self.clock.now_secs())
            .map(|entry| entry.data.clone())
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.domains.clear();
    }

    /// Drops the `index`-th domain (1-based, iteration order) with all its
    /// entries. Returns `false` when there is no such domain.
    pub fn remove(&mut self, index: usize) -> bool {
        if index == 0 || index > self.order.len() {
            return false;
        }

        let domain = self.order.remove(index - 1);
        self.domains.remove(&domain);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every domain with every entry, expired ones included.
    pub fn snapshot(&self) -> Vec<CachedDomain> {
        self.order
            .iter()
            .filter_map(|domain| {
                self.domains.get(domain).map(|entries| CachedDomain {
                    domain: domain.clone(),
                    entries: entries.to_vec(),
                })
            })
            .collect()
    }

    fn live(&self, domain: &str, record_type: RecordType, now: u64) -> Option<&CacheEntry> {
        self.domains
            .get(fqdn(domain).as_str())?
            .iter()
            .find(|(rt, _)| *rt == record_type)
            .map(|(_, entry)| entry)
            .filter(|entry| entry.is_live(now))
    }

    fn store(&mut self, domain: &str, record_type: RecordType, entry: CacheEntry) {
        let domain = fqdn(domain);
        if !self.domains.contains_key(&domain) {
            self.order.push(domain.clone());
        }
        let entries = self.domains.entry(domain).or_default();

        match entries.iter_mut().find(|(rt, _)| *rt == record_type) {
            Some(slot) => slot.1 = entry,
            None => entries.push((record_type, entry)),
        }
    }
}
