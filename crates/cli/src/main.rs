use clap::Parser;
use ferrous_lookup_domain::{CliOverrides, DnsClass, LookupEvent, RecordType, TransportType};
use std::net::IpAddr;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod output;

use output::{OutputFormat, Printer};

#[derive(Parser, Debug)]
#[command(name = "ferrous-lookup")]
#[command(version)]
#[command(about = "Ferrous Lookup - query many hosts against many DNS servers at once")]
struct Cli {
    /// Hosts (or addresses, for PTR) to look up
    #[arg(value_name = "HOST", required_unless_present = "reverse")]
    hosts: Vec<String>,

    /// Record type (A, AAAA, CNAME, MX, NS, PTR, SOA, TXT, NAPTR, ANY)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    record_type: Option<RecordType>,

    /// Query class (IN, CH, HS, ANY)
    #[arg(long)]
    class: Option<DnsClass>,

    /// DNS server to query instead of the system resolvers (repeatable)
    #[arg(short = 's', long = "server", value_name = "IP")]
    servers: Vec<String>,

    /// Port used with --server
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Query over TCP instead of UDP
    #[arg(long)]
    tcp: bool,

    /// Clear the recursion-desired flag
    #[arg(long)]
    no_recursion: bool,

    /// Do not reuse answers within a lookup
    #[arg(long)]
    no_cache: bool,

    /// Sends per query before giving up
    #[arg(long)]
    attempts: Option<u32>,

    /// Per-attempt timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Suffix appended to single-label hosts instead of the system one
    #[arg(long, value_name = "DOMAIN", conflicts_with = "no_suffix")]
    suffix: Option<String>,

    /// Never append a suffix
    #[arg(long)]
    no_suffix: bool,

    /// Follow CNAME targets (only with --type ANY)
    #[arg(long)]
    resolve_cname: bool,

    /// Resolve one address to its PTR names, trying servers in order
    #[arg(long, value_name = "IP", conflicts_with = "hosts")]
    reverse: Option<IpAddr>,

    /// Print one JSON object per line
    #[arg(long)]
    json: bool,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            record_type: self.record_type,
            class: self.class,
            servers: (!self.servers.is_empty()).then(|| self.servers.clone()),
            port: self.port,
            transport: self.tcp.then_some(TransportType::Tcp),
            recursion: self.no_recursion.then_some(false),
            use_resolver_cache: self.no_cache.then_some(false),
            attempts: self.attempts,
            timeout_ms: self.timeout_ms,
            add_dns_suffix: self.no_suffix.then_some(false),
            custom_dns_suffix: self.suffix.clone(),
            resolve_cname: self.resolve_cname.then_some(true),
            log_level: self.log_level.clone(),
            log_json: None,
        }
    }

    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);

    info!("Starting Ferrous Lookup v{}", env!("CARGO_PKG_VERSION"));

    let use_cases = di::UseCases::new();
    let options = config.lookup.to_options();
    let mut printer = Printer::stdout(cli.output_format());

    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    if let Some(address) = cli.reverse {
        let result = use_cases
            .reverse_lookup
            .execute_with_cancellation(address, &options, &cancel)
            .await?;
        printer.ptr(&result)?;
        return Ok(());
    }

    let mut handle = use_cases
        .bulk_lookup
        .start_with_cancellation(cli.hosts, options, cancel);

    while let Some(event) = handle.next().await {
        printer.event(&event)?;
        if let LookupEvent::Complete(summary) = &event {
            info!(
                records = summary.records,
                errors = summary.errors,
                cancelled = summary.cancelled,
                "Lookup finished"
            );
            break;
        }
    }

    Ok(())
}

fn cancel_on_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling lookup");
            cancel.cancel();
        }
    });
}
