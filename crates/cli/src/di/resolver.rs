use anyhow::Context;
use rootwalk_application::services::RecordCache;
use rootwalk_application::use_cases::{ResolutionLimits, ResolveDomainUseCase};
use rootwalk_domain::Config;
use rootwalk_infrastructure::dns::transport::UdpTransport;
use rootwalk_infrastructure::dns::UdpNameServerClient;
use rootwalk_infrastructure::system::SystemClock;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct ResolverServices {
    pub use_case: ResolveDomainUseCase,
    pub cache: RecordCache,
}

impl ResolverServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver = &config.resolver;

        let bind_addr = resolver
            .bind_socket_addr()
            .with_context(|| format!("invalid bind address '{}'", resolver.bind_address))?;
        let root = resolver
            .root_server_addr()
            .with_context(|| format!("invalid root server '{}'", resolver.root_server))?;

        let transport =
            UdpTransport::bind(bind_addr, Duration::from_secs(resolver.query_timeout)).await?;
        info!(local = %transport.local_addr()?, "Query socket ready");

        let client = UdpNameServerClient::new(Arc::new(transport), resolver.dns_port);
        let limits = ResolutionLimits {
            max_depth: resolver.max_depth,
            max_queries: resolver.max_queries,
        };

        Ok(Self {
            use_case: ResolveDomainUseCase::new(Arc::new(client), limits),
            cache: RecordCache::new(root, Arc::new(SystemClock)),
        })
    }
}
