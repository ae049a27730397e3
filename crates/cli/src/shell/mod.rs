//! Interactive read-resolve-print loop over the record cache.

mod command;
mod listing;

pub use command::Command;

use rootwalk_application::services::RecordCache;
use rootwalk_application::use_cases::ResolveDomainUseCase;
use rootwalk_domain::DomainError;
use std::net::Ipv4Addr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

pub const PROMPT: &str = "Enter a domain name or .exit > ";

pub struct Shell {
    resolver: ResolveDomainUseCase,
    cache: RecordCache,
}

impl Shell {
    pub fn new(resolver: ResolveDomainUseCase, cache: RecordCache) -> Self {
        Self { resolver, cache }
    }

    pub async fn resolve(&mut self, domain: &str) -> Result<Ipv4Addr, DomainError> {
        self.resolver.execute(&mut self.cache, domain).await
    }

    /// Runs until `.exit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                output.write_all(b"\n").await?;
                break;
            };

            if !self.handle(Command::parse(&line), &mut output).await? {
                break;
            }
        }

        output.flush().await
    }

    /// Returns `false` once the shell should stop.
    async fn handle<W>(&mut self, command: Command, output: &mut W) -> std::io::Result<bool>
    where
        W: AsyncWrite + Unpin,
    {
        match command {
            Command::Exit => return Ok(false),
            Command::Empty => {}
            Command::Resolve(domain) => match self.resolve(&domain).await {
                Ok(ip) => output.write_all(format!("{}\n", ip).as_bytes()).await?,
                Err(e) => warn!(domain = %domain, error = %e, "Resolution failed"),
            },
            Command::Clear => {
                self.cache.clear();
                debug!("Cache cleared");
            }
            Command::List => {
                let now = self.cache.now_secs();
                for (i, domain) in self.cache.snapshot().iter().enumerate() {
                    let line = listing::format_domain(i + 1, domain, now);
                    output.write_all(format!("{}\n", line).as_bytes()).await?;
                }
            }
            Command::Remove(index) => {
                if !self.cache.remove(index) {
                    debug!(index, "No cached domain at index");
                }
            }
            Command::Usage(usage) => output.write_all(format!("{}\n", usage).as_bytes()).await?,
            Command::Unknown(name) => {
                let hint = format!(
                    "unknown command {}; try .list, .clear, .remove N or .exit\n",
                    name
                );
                output.write_all(hint.as_bytes()).await?;
            }
        }

        Ok(true)
    }
}
