use clap::Parser;
use rootwalk_domain::CliOverrides;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod shell;

#[derive(Parser)]
#[command(name = "rootwalk")]
#[command(version)]
#[command(about = "rootwalk - iterative DNS resolver that walks the delegation tree from a root server")]
struct Cli {
    /// Domain to resolve once; starts the interactive shell when omitted
    domain: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Root nameserver to start every resolution from (IPv4)
    #[arg(long, value_name = "IP")]
    root_server: Option<String>,

    /// Per-query receive timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        root_server: cli.root_server.clone(),
        query_timeout: cli.timeout,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(
        root_server = %config.resolver.root_server,
        timeout_secs = config.resolver.query_timeout,
        "Starting rootwalk v{}",
        env!("CARGO_PKG_VERSION")
    );

    let services = di::ResolverServices::new(&config).await?;
    let mut shell = shell::Shell::new(services.use_case, services.cache);

    match cli.domain {
        Some(domain) => match shell.resolve(&domain).await {
            Ok(ip) => {
                println!("{}", ip);
                Ok(())
            }
            Err(e) => {
                warn!(domain = %domain, error = %e, "Resolution failed");
                Err(e.into())
            }
        },
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell.run(stdin, tokio::io::stdout()).await?;
            Ok(())
        }
    }
}
