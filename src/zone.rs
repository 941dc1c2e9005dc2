//! Authoritative zone discovery.
//!
//! DNSPod identifies a hosted zone by the registrable domain name, while the
//! orchestration framework hands the solver the zone it resolved for the
//! challenge FQDN. [`ZoneResolver`] bridges the two: starting from the full
//! name it queries recursive nameservers for NS records of each ascending
//! suffix, taking the first suffix that is actually delegated as the
//! authoritative zone.

use crate::error::Error;
use std::net::SocketAddr;
use trust_dns_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::TokioAsyncResolver;

/// Contract for finding the zone delegated to authoritative nameservers.
#[async_trait::async_trait]
pub trait ZoneResolver: Send + Sync {
    /// Return the authoritative zone for `fqdn` in trailing-dot form, or an
    /// error when no ascending suffix resolves.
    async fn find_zone_by_fqdn(&self, fqdn: &str) -> Result<String, Error>;
}

/// [`ZoneResolver`] backed by recursive NS lookups.
#[allow(clippy::module_name_repetitions)]
pub struct RecursiveZoneResolver {
    resolver: TokioAsyncResolver,
}

impl RecursiveZoneResolver {
    /// Build a resolver using the host's resolver configuration
    /// (`/etc/resolv.conf` or platform equivalent).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resolve`] when the system configuration can't be read.
    pub fn from_system_conf() -> Result<Self, Error> {
        Ok(Self {
            resolver: TokioAsyncResolver::tokio_from_system_conf()?,
        })
    }

    /// Build a resolver against an explicit list of recursive nameservers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resolve`] when the resolver can't be constructed.
    pub fn with_nameservers(addrs: &[SocketAddr]) -> Result<Self, Error> {
        let mut config = ResolverConfig::new();
        for addr in addrs {
            config.add_name_server(NameServerConfig::new(*addr, Protocol::Udp));
        }
        Ok(Self {
            resolver: TokioAsyncResolver::tokio(config, ResolverOpts::default())?,
        })
    }
}

#[async_trait::async_trait]
impl ZoneResolver for RecursiveZoneResolver {
    async fn find_zone_by_fqdn(&self, fqdn: &str) -> Result<String, Error> {
        for candidate in ascending_zones(fqdn) {
            match self.resolver.ns_lookup(candidate.as_str()).await {
                Ok(lookup) => {
                    if lookup.iter().next().is_some() {
                        return Ok(candidate);
                    }
                }
                // NODATA/NXDOMAIN on an intermediate label; keep walking up.
                Err(err) => match err.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => continue,
                    _ => return Err(err.into()),
                },
            }
        }
        Err(Error::ZoneResolution(fqdn.to_string()))
    }
}

/// Strip the trailing dot from an FQDN, if present.
#[must_use]
pub fn un_fqdn(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Every suffix of `fqdn` from longest to shortest, each in trailing-dot form.
fn ascending_zones(fqdn: &str) -> Vec<String> {
    let labels: Vec<&str> = un_fqdn(fqdn).split('.').filter(|l| !l.is_empty()).collect();
    (0..labels.len())
        .map(|i| format!("{}.", labels[i..].join(".")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn un_fqdn_strips_single_trailing_dot() {
        assert_eq!(un_fqdn("example.com."), "example.com");
        assert_eq!(un_fqdn("example.com"), "example.com");
        assert_eq!(un_fqdn("."), "");
    }

    #[test]
    fn ascending_zones_walks_up_the_label_hierarchy() {
        assert_eq!(
            ascending_zones("_acme-challenge.example.com."),
            vec![
                "_acme-challenge.example.com.".to_string(),
                "example.com.".to_string(),
                "com.".to_string(),
            ]
        );
    }

    #[test]
    fn ascending_zones_of_root_is_empty() {
        assert!(ascending_zones(".").is_empty());
    }
}
