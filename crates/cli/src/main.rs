use clap::{Parser, Subcommand};
use dnsguard_application::ports::PolicyStorePort;
use dnsguard_domain::{CliOverrides, Config, FilterRequest, RecordType};
use dnsguard_jobs::JobRunner;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "dnsguard")]
#[command(version)]
#[command(about = "dnsguard - reputation and category based DNS query filtering")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Classification daemon address
    #[arg(long)]
    daemon_address: Option<String>,

    /// Classification daemon port
    #[arg(long)]
    daemon_port: Option<u16>,

    /// Directory holding customer policy files
    #[arg(short = 'p', long, value_name = "DIR")]
    policy_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Load policies and keep them in sync with the policy directory
    Run,
    /// Evaluate a single query against the daemon and current policies
    Check {
        /// Query name, e.g. example.com.
        name: String,
        /// Client address as listed in the policy files
        client: String,
        /// Record type (A or AAAA)
        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        daemon_address: cli.daemon_address.clone(),
        daemon_port: cli.daemon_port,
        policy_root: cli.policy_dir.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config, cli.log_level.as_deref());

    info!("Starting dnsguard v{}", env!("CARGO_PKG_VERSION"));

    let services = di::FilterServices::new(&config)?;

    if let Err(e) = services.reload_policies.execute().await {
        warn!(error = %e, "Starting with an empty policy store");
    }

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(&config, &services).await,
        Command::Check {
            name,
            client,
            record_type,
        } => check(&services, &name, &client, &record_type).await,
    }
}

async fn run(config: &Config, services: &di::FilterServices) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();

    let mut runner = JobRunner::new().with_shutdown_token(shutdown.clone());
    if config.policy.watch {
        runner = runner.with_policy_reload(services.policy_reload_job(config));
    } else {
        info!("Policy directory watch disabled");
    }
    let handles = runner.start().await;

    info!(
        policies = services.policy_store.policy_count(),
        "dnsguard ready"
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");

    shutdown.cancel();
    for handle in handles {
        if let Err(e) = handle.await {
            warn!(error = %e, "Background job ended abnormally");
        }
    }

    info!("Shutdown complete");
    Ok(())
}

async fn check(
    services: &di::FilterServices,
    name: &str,
    client: &str,
    record_type: &str,
) -> anyhow::Result<()> {
    let record_type = record_type
        .parse::<RecordType>()
        .map_err(anyhow::Error::msg)?;

    let has_policy = services.policy_store.snapshot().lookup(client).is_some();
    let outcome = services
        .filter_query
        .execute(&FilterRequest::new(name, client, record_type))
        .await;

    println!("daemon:  {}", services.classifier.server());
    println!("name:    {}", name);
    println!("client:  {} ({})", client, if has_policy { "policy" } else { "no policy" });
    println!("type:    {}", record_type);
    println!("outcome: {}", outcome);
    Ok(())
}
