use dnsguard_domain::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Filter precedence: `--log-level`, then `RUST_LOG`, then the config file.
pub fn init_logging(config: &Config, cli_level: Option<&str>) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(cli_level, env.as_deref(), &config.logging.level);

    let filter = EnvFilter::try_new(directive)
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_ansi(true)
        .init();

    info!("Logging initialized at level: {}", directive);
}

fn filter_directive<'a>(
    cli_level: Option<&'a str>,
    env: Option<&'a str>,
    configured: &'a str,
) -> &'a str {
    cli_level
        .or(env.filter(|value| !value.trim().is_empty()))
        .unwrap_or(configured)
}
