use ferrous_lookup_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        record_type = %config.lookup.record_type,
        transport = %config.lookup.transport,
        custom_servers = config.lookup.use_custom_dns_server,
        attempts = config.lookup.attempts,
        timeout_ms = config.lookup.timeout_ms,
        "Configuration loaded"
    );

    Ok(config)
}
