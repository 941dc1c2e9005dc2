use serde::{Deserialize, Serialize};

/// A single DNS-01 challenge action delivered by the control plane.
///
/// Field names mirror the orchestration framework's webhook payload; fields
/// the solver doesn't consume (uid, action, dnsName, ...) are ignored.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Namespace the referenced credential secret lives in.
    #[serde(default)]
    pub resource_namespace: String,
    /// Fully-qualified name to validate, trailing-dot terminated.
    #[serde(rename = "resolvedFQDN")]
    pub resolved_fqdn: String,
    /// Authoritative zone resolved for the FQDN, trailing-dot terminated.
    pub resolved_zone: String,
    /// Opaque proof value to publish in the TXT record.
    pub key: String,
    /// Opaque per-request solver configuration blob, decoded by
    /// [`load_config`][`crate::solver::load_config`].
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

/// Acknowledgement body for a processed challenge action.
#[derive(Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub(super) struct ChallengeResult {
    pub solver: String,
}

/// Group/solver discovery document served at `/`.
#[derive(Serialize, Debug, Clone)]
pub(super) struct Discovery {
    pub group: String,
    pub solvers: Vec<String>,
}
