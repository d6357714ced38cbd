use ferrous_lookup_application::ports::SystemResolverConfig;
use std::net::IpAddr;
use std::path::Path;
use tracing::{debug, warn};

pub const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

/// The parts of `resolv.conf` the lookup cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvConf {
    pub name_servers: Vec<IpAddr>,

    pub domain: Option<String>,

    pub search: Vec<String>,
}

impl ResolvConf {
    pub fn parse(contents: &str) -> Self {
        let mut conf = ResolvConf::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("nameserver") => {
                    if let Some(value) = fields.next() {
                        match parse_nameserver(value) {
                            Some(address) => conf.name_servers.push(address),
                            None => debug!(value, "Ignoring unparsable nameserver line"),
                        }
                    }
                }
                // `domain` and `search` exclude each other; the last one wins.
                Some("domain") => {
                    conf.domain = fields.next().map(str::to_string);
                    conf.search.clear();
                }
                Some("search") => {
                    conf.search = fields.map(str::to_string).collect();
                    conf.domain = None;
                }
                _ => {}
            }
        }

        conf
    }

    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// `domain`, else the first `search` entry.
    pub fn suffix(&self) -> Option<String> {
        self.domain
            .clone()
            .or_else(|| self.search.first().cloned())
            .filter(|s| !s.trim_matches('.').is_empty())
    }
}

/// Drops an IPv6 zone id (`fe80::1%eth0`) before parsing.
fn parse_nameserver(value: &str) -> Option<IpAddr> {
    let address = value.split('%').next().unwrap_or(value);
    address.parse().ok()
}

/// The machine's resolver configuration, read once at start-up.
#[derive(Debug, Clone, Default)]
pub struct SystemResolver {
    conf: ResolvConf,
    host_name: Option<String>,
}

impl SystemResolver {
    /// Reads `/etc/resolv.conf`; a missing file leaves no system servers.
    pub fn load() -> Self {
        Self::load_from(RESOLV_CONF_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let conf = match ResolvConf::load(path) {
            Ok(conf) => conf,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read resolver configuration");
                ResolvConf::default()
            }
        };

        debug!(
            path = %path.display(),
            name_servers = conf.name_servers.len(),
            domain = ?conf.domain,
            "Loaded resolver configuration"
        );

        Self::new(conf, local_host_name())
    }

    pub fn new(conf: ResolvConf, host_name: Option<String>) -> Self {
        Self { conf, host_name }
    }

    pub fn conf(&self) -> &ResolvConf {
        &self.conf
    }
}

impl SystemResolverConfig for SystemResolver {
    fn name_servers(&self) -> Vec<IpAddr> {
        self.conf.name_servers.clone()
    }

    fn domain_suffix(&self) -> Option<String> {
        self.conf
            .suffix()
            .or_else(|| self.host_name.as_deref().and_then(host_name_suffix))
    }
}

fn local_host_name() -> Option<String> {
    hostname::get().ok()?.into_string().ok()
}

/// `box.lan.example` → `lan.example`
fn host_name_suffix(host_name: &str) -> Option<String> {
    let (_, suffix) = host_name.split_once('.')?;
    let suffix = suffix.trim_matches('.');
    (!suffix.is_empty()).then(|| suffix.to_string())
}
