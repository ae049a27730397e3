use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// `l.root-servers.net`, operated by ICANN.
pub const DEFAULT_ROOT_SERVER: &str = "199.7.83.42";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Root nameserver every walk starts from.
    #[serde(default = "default_root_server")]
    pub root_server: String,

    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// Local address the query socket binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Receive timeout per query, in seconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Maximum number of nameserver lookups nested inside one resolution.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of queries a single resolution may send.
    #[serde(default = "default_max_queries")]
    pub max_queries: usize,
}

impl ResolverConfig {
    pub fn root_server_addr(&self) -> Option<Ipv4Addr> {
        self.root_server.parse().ok()
    }

    pub fn bind_socket_addr(&self) -> Option<SocketAddr> {
        self.bind_address
            .parse::<IpAddr>()
            .ok()
            .map(|ip| SocketAddr::new(ip, 0))
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_server: default_root_server(),
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            query_timeout: default_query_timeout(),
            max_depth: default_max_depth(),
            max_queries: default_max_queries(),
        }
    }
}

fn default_root_server() -> String {
    DEFAULT_ROOT_SERVER.to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_query_timeout() -> u64 {
    2
}

fn default_max_depth() -> usize {
    16
}

fn default_max_queries() -> usize {
    64
}
