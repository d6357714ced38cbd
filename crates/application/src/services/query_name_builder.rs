//! Turns a target host or address into the name and type actually sent.
//!
//! - single-label names get the configured (or system) suffix; IPv6 literals
//!   contain no dot but are never suffixed, so `::1` stays a valid PTR target
//! - PTR lookups of IP literals become `in-addr.arpa` / `ip6.arpa` names
//! - NAPTR lookups become ENUM names under `e164.arpa`

use ferrous_lookup_domain::{LookupOptions, RecordType};
use std::net::IpAddr;
use std::sync::Arc;

use crate::ports::SystemResolverConfig;

const ENUM_ROOT: &str = "e164.arpa";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryName {
    pub name: String,

    pub record_type: RecordType,
}

#[derive(Clone)]
pub struct QueryNameBuilder {
    system: Arc<dyn SystemResolverConfig>,
}

impl QueryNameBuilder {
    pub fn new(system: Arc<dyn SystemResolverConfig>) -> Self {
        Self { system }
    }

    pub fn build(&self, host: &str, options: &LookupOptions) -> QueryName {
        let host = host.trim();
        let mut name = host.to_string();

        // An IPv6 literal has no dot either, but must never be suffixed.
        if !host.contains('.') && options.add_dns_suffix && host.parse::<IpAddr>().is_err() {
            if let Some(suffix) = self.suffix(options) {
                name = format!("{}.{}", name, suffix);
            }
        }

        match options.record_type {
            RecordType::PTR => {
                if let Ok(address) = name.parse::<IpAddr>() {
                    name = reverse_name(&address);
                }
            }
            RecordType::NAPTR => {
                name = enum_name(&name);
            }
            _ => {}
        }

        QueryName {
            name,
            record_type: options.record_type,
        }
    }

    fn suffix(&self, options: &LookupOptions) -> Option<String> {
        let suffix = if options.use_custom_dns_suffix {
            Some(options.custom_dns_suffix.clone())
        } else {
            self.system.domain_suffix()
        }?;

        let suffix = suffix.trim().trim_matches('.');
        (!suffix.is_empty()).then(|| suffix.to_string())
    }
}

/// Reverse-mapping name for an address.
pub fn reverse_name(address: &IpAddr) -> String {
    match address {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            format!(
                "{}.{}.{}.{}.in-addr.arpa",
                octets[3], octets[2], octets[1], octets[0]
            )
        }
        IpAddr::V6(ipv6) => {
            let mut nibbles = Vec::with_capacity(32);
            for byte in ipv6.octets().iter().rev() {
                nibbles.push(format!("{:x}", byte & 0x0f));
                nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
            }
            format!("{}.ip6.arpa", nibbles.join("."))
        }
    }
}

/// ENUM name for a phone-number-like string. Non-digits are dropped.
pub fn enum_name(number: &str) -> String {
    let mut labels: Vec<String> = number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .rev()
        .map(String::from)
        .collect();
    labels.push(ENUM_ROOT.to_string());
    labels.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_name_ipv4() {
        let ip: IpAddr = "192.0.2.10".parse().unwrap();
        assert_eq!(reverse_name(&ip), "10.2.0.192.in-addr.arpa");
    }

    #[test]
    fn test_reverse_name_ipv6() {
        let ip: IpAddr = "2001:db8::567:89ab".parse().unwrap();
        assert_eq!(
            reverse_name(&ip),
            "b.a.9.8.7.6.5.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa"
        );
    }

    #[test]
    fn test_enum_name() {
        assert_eq!(enum_name("+1-555-0100"), "0.0.1.0.5.5.5.1.e164.arpa");
        assert_eq!(enum_name("4930"), "0.3.9.4.e164.arpa");
        assert_eq!(enum_name("no digits"), "e164.arpa");
    }
}
