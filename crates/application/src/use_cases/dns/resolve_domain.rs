use rootwalk_domain::{fqdn, DomainError, RecordType};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::ports::NameServerClient;
use crate::services::{CacheSignal, RecordCache};

/// Bounds on one top-level resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionLimits {
    /// Nameserver lookups that may be nested inside each other. The
    /// top-level name does not count, so `1` allows one glueless lookup but
    /// not a lookup started from inside it.
    pub max_depth: usize,
    /// Queries that may be sent in total, sub-resolutions included.
    pub max_queries: usize,
}

impl Default for ResolutionLimits {
    fn default() -> Self {
        Self {
            max_depth: 16,
            max_queries: 64,
        }
    }
}

/// One name being walked down the delegation tree.
#[derive(Debug)]
struct Frame {
    label: String,
    ns: Ipv4Addr,
    ns_domain: Option<String>,
}

impl Frame {
    fn new(label: String, root: Ipv4Addr) -> Self {
        Self {
            label,
            ns: root,
            ns_domain: None,
        }
    }

    fn restart(&mut self, label: String, root: Ipv4Addr) {
        self.label = label;
        self.ns = root;
        self.ns_domain = None;
    }
}

/// Iterative resolver: starts at the root, follows referrals, restarts from
/// the root on CNAME, and resolves nameserver host names that arrive without
/// glue before it can continue.
///
/// Nested nameserver lookups live on an explicit stack instead of the call
/// stack, so a delegation loop ends in `ResolutionLimitExceeded`.
pub struct ResolveDomainUseCase {
    client: Arc<dyn NameServerClient>,
    limits: ResolutionLimits,
}

impl ResolveDomainUseCase {
    pub fn new(client: Arc<dyn NameServerClient>, limits: ResolutionLimits) -> Self {
        Self { client, limits }
    }

    #[instrument(skip(self, cache))]
    pub async fn execute(
        &self,
        cache: &mut RecordCache,
        domain: &str,
    ) -> Result<Ipv4Addr, DomainError> {
        let domain = fqdn(domain);
        if domain.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "empty domain name".to_string(),
            ));
        }

        if let Some(ip) = cached_address(cache, &domain)? {
            info!(domain = %domain, ip = %ip, "Found cached A record");
            return Ok(ip);
        }

        let root = cache.root_server();
        let mut stack = vec![Frame::new(domain.clone(), root)];
        let mut queries = 0usize;

        loop {
            let Some(frame) = stack.last_mut() else {
                return Err(DomainError::NoNameserver(domain));
            };

            if queries >= self.limits.max_queries {
                warn!(label = %frame.label, queries, "Query budget exhausted");
                return Err(DomainError::ResolutionLimitExceeded(format!(
                    "more than {} queries while resolving {}",
                    self.limits.max_queries, domain
                )));
            }
            queries += 1;

            info!(
                label = %frame.label,
                ns = %frame.ns,
                "Asking for records from {} ({})",
                frame.ns_domain.as_deref().unwrap_or("root"),
                frame.ns
            );

            let records = self
                .client
                .query(&frame.label, RecordType::A, frame.ns)
                .await?;

            let host = match cache.put(&records) {
                CacheSignal::Cname(target) => {
                    debug!(from = %frame.label, to = %target, "Following CNAME from the root");
                    frame.restart(target, root);
                    continue;
                }
                signal => {
                    if let Some(ip) = cached_address(cache, &frame.label)? {
                        stack.pop();
                        match stack.last_mut() {
                            Some(parent) => {
                                debug!(
                                    ns_domain = parent.ns_domain.as_deref().unwrap_or_default(),
                                    ip = %ip,
                                    "Nameserver address resolved"
                                );
                                parent.ns = ip;
                                continue;
                            }
                            None => {
                                info!(domain = %domain, ip = %ip, queries, "Resolution complete");
                                return Ok(ip);
                            }
                        }
                    }

                    match signal {
                        CacheSignal::Ns(host) => host,
                        _ => {
                            warn!(label = %frame.label, "No nameserver");
                            return Err(DomainError::NoNameserver(frame.label.clone()));
                        }
                    }
                }
            };

            frame.ns_domain = Some(host.clone());
            match cached_address(cache, &host)? {
                Some(ip) => frame.ns = ip,
                None => {
                    // Frames below the top-level one are nested lookups;
                    // pushing makes `stack.len()` of them.
                    if stack.len() > self.limits.max_depth {
                        warn!(ns_domain = %host, depth = stack.len(), "Nameserver lookups nested too deep");
                        return Err(DomainError::ResolutionLimitExceeded(format!(
                            "nameserver lookups nested deeper than {} while resolving {}",
                            self.limits.max_depth, domain
                        )));
                    }
                    debug!(ns_domain = %host, "Resolving nameserver address from the root");
                    stack.push(Frame::new(host, root));
                }
            }
        }
    }
}

fn cached_address(cache: &RecordCache, domain: &str) -> Result<Option<Ipv4Addr>, DomainError> {
    cache
        .get(domain, RecordType::A)
        .map(|data| {
            data.parse()
                .map_err(|_| DomainError::InvalidDnsResponse(format!("bad A record data '{}'", data)))
        })
        .transpose()
}
