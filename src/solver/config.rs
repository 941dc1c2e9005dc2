use crate::error::Error;
use serde::Deserialize;

/// TTL applied to presented records when the challenge config doesn't set one.
pub const DEFAULT_TTL: u32 = 600;

/// Reference to a key within a named secret object.
#[derive(Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct SecretKeySelector {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: String,
}

/// Per-request solver configuration, decoded from the opaque config blob the
/// control plane attaches to each challenge.
///
/// `ttl` is always present after decoding; an absent or null field falls back
/// to [`DEFAULT_TTL`]. No further validation happens here: an `api_id` of 0
/// passes through and fails downstream at client construction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SolverConfig {
    pub api_id: i64,
    pub api_token_secret_ref: SecretKeySelector,
    pub ttl: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            api_id: 0,
            api_token_secret_ref: SecretKeySelector::default(),
            ttl: DEFAULT_TTL,
        }
    }
}

#[derive(Deserialize, Default)]
struct RawSolverConfig {
    #[serde(rename = "apiID", default)]
    api_id: i64,
    #[serde(rename = "apiTokenSecretRef", default)]
    api_token_secret_ref: SecretKeySelector,
    #[serde(default)]
    ttl: Option<u32>,
}

/// Decode a challenge's config blob, falling back to the default config when
/// no blob was provided. Unknown fields are ignored.
///
/// # Errors
///
/// Returns [`Error::ConfigDecode`] carrying the parse diagnostic when the
/// blob doesn't decode into the expected shape.
pub fn load_config(raw: Option<&serde_json::Value>) -> Result<SolverConfig, Error> {
    let raw = match raw {
        None => return Ok(SolverConfig::default()),
        Some(raw) => raw,
    };
    let decoded: RawSolverConfig =
        serde_json::from_value(raw.clone()).map_err(Error::ConfigDecode)?;
    Ok(SolverConfig {
        api_id: decoded.api_id,
        api_token_secret_ref: decoded.api_token_secret_ref,
        ttl: decoded.ttl.unwrap_or(DEFAULT_TTL),
    })
}
