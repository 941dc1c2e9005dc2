//! Error types.

use crate::dnspod::ProviderApiError;
use axum::extract::rejection::JsonRejection;
use std::net::IpAddr;
use trust_dns_resolver::error::ResolveError;

/// Error enumerates the possible webhook error states.
///
/// Every variant is terminal for the challenge call that produced it: nothing
/// is retried here. Errors propagate unmodified to the orchestration layer,
/// which surfaces them to the control plane (typically causing the whole
/// challenge to be re-attempted later).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a per-request solver config blob can't be decoded into a
    /// [`SolverConfig`][`crate::solver::SolverConfig`].
    #[error("error decoding solver config: {0}")]
    ConfigDecode(#[source] serde_json::Error),

    /// Returned when the referenced secret object can't be fetched from the
    /// [secret store][`crate::secrets::SecretStore`].
    #[error("secret \"{namespace}/{name}\" not found in secret store")]
    SecretNotFound { namespace: String, name: String },

    /// Returned when a fetched secret object has no entry for the referenced
    /// key.
    #[error("no api token for key \"{key}\" in secret \"{namespace}/{name}\"")]
    SecretKeyMissing {
        namespace: String,
        name: String,
        key: String,
    },

    /// Returned when a DNSPod API call fails, wrapping the underlying
    /// transport or API status error.
    #[error("dnspod API call failed: {0}")]
    ProviderApi(#[from] ProviderApiError),

    /// Returned when the authoritative zone for a challenge has no matching
    /// domain visible under the DNSPod account.
    #[error("zone {auth_zone} not found in dnspod for zone {zone}")]
    DomainNotFound { auth_zone: String, zone: String },

    /// Returned when no ascending suffix of an FQDN resolves to a delegated
    /// zone.
    #[error("could not find the authoritative zone for \"{0}\"")]
    ZoneResolution(String),

    /// Returned when a recursive DNS lookup fails at the transport level.
    #[error("DNS resolution error")]
    Resolve(#[from] ResolveError),

    /// Returned when a challenge is handled before
    /// [`Solver::initialize`][`crate::solver::Solver::initialize`] has run.
    #[error("solver has not been initialized")]
    NotInitialized,

    /// Returned when clients `POST` invalid JSON.
    #[error(transparent)]
    JsonExtractorRejection(#[from] JsonRejection),

    /// Returned when the [`Config::api_bind_addr`][`crate::config::Config::api_bind_addr`] is
    /// not a loopback address, or an address within a private network space.
    /// The webhook is always intended to sit behind the orchestration
    /// framework on a private network.
    #[error("API bind address ({0}) must be a loopback or private IP")]
    InsecureApiBind(IpAddr),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    Io(#[from] std::io::Error),

    /// Returned when processing JSON from disk (e.g.
    /// [loading a `Config`][crate::config::Config::try_from_file] or
    /// [loading a `FileSecretStore`][crate::secrets::FileSecretStore::try_from_file])
    /// fails due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJson(#[from] serde_json::Error),
}

impl Error {
    /// True when the error is DNSPod's "No records" condition, reported by
    /// `Record.List` when a domain has no records under the queried name.
    /// CleanUp treats this as an empty result set rather than a failure.
    #[must_use]
    pub fn is_no_records(&self) -> bool {
        match self {
            Error::ProviderApi(err) => err.is_no_records(),
            _ => false,
        }
    }
}
