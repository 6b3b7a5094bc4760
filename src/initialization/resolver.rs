//! DNS resolver initialization.
//!
//! Builds the shared `TokioResolver` either from the system configuration or
//! from an explicit nameserver list, restricted to one transport protocol.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use hickory_resolver::config::{NameServerConfig, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioResolver;
use log::debug;

use crate::config::DNS_PORT;
use crate::error_handling::InitializationError;

/// Resolver options shared by every query of a scan.
///
/// One attempt per query, so a dead server costs a single timeout, and
/// `ndots = 0` so names are never expanded with search domains.
pub fn resolver_options(timeout: Duration) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    opts.ndots = 0;
    opts
}

/// Initializes the DNS resolver for forward and reverse lookups.
///
/// # Arguments
///
/// * `nameservers` - Explicit nameservers; empty means use the system configuration
/// * `tcp` - Query over TCP instead of UDP
/// * `timeout` - Per-query timeout
///
/// # Returns
///
/// A configured `TokioResolver`.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the system configuration
/// cannot be read, or if it lists no nameserver for the chosen protocol.
pub fn init_resolver(
    nameservers: &[IpAddr],
    tcp: bool,
    timeout: Duration,
) -> Result<TokioResolver, InitializationError> {
    let protocol = if tcp { Protocol::Tcp } else { Protocol::Udp };
    let config = resolver_config(nameservers, protocol)?;

    debug!(
        "Resolver uses {} nameserver(s) over {protocol:?}",
        config.name_servers().len()
    );

    Ok(
        TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(resolver_options(timeout))
            .build(),
    )
}

fn resolver_config(
    nameservers: &[IpAddr],
    protocol: Protocol,
) -> Result<ResolverConfig, InitializationError> {
    if !nameservers.is_empty() {
        let mut config = ResolverConfig::new();
        for ip in nameservers {
            config.add_name_server(NameServerConfig::new(
                SocketAddr::new(*ip, DNS_PORT),
                protocol,
            ));
        }
        return Ok(config);
    }

    let (system, _) =
        read_system_conf().map_err(|e| InitializationError::DnsResolverError(e.to_string()))?;
    let servers: Vec<NameServerConfig> = system
        .name_servers()
        .iter()
        .filter(|ns| ns.protocol == protocol)
        .cloned()
        .collect();
    if servers.is_empty() {
        return Err(InitializationError::DnsResolverError(format!(
            "system configuration lists no {protocol:?} nameservers"
        )));
    }
    Ok(ResolverConfig::from_parts(
        system.domain().cloned(),
        system.search().to_vec(),
        servers,
    ))
}
