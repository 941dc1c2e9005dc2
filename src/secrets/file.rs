//! A JSON file-backed implementation of the [`SecretStore`][super::SecretStore] trait.
//!
//! The file maps `"namespace/name"` to the key/value entries of one secret
//! object:
//!
//! ```json
//! {
//!   "default/dnspod-credentials": { "api-token": "xxxxxxxxxxxxxxxx" }
//! }
//! ```
//!
//! Contents are loaded once when the solver initializes; credential changes
//! require a restart.
use crate::error::Error;
use crate::secrets::{SecretData, SecretStore};
use std::collections::HashMap;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// A file-backed secret store, loaded from JSON at startup.
#[derive(Default, Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FileSecretStore {
    secrets: HashMap<String, HashMap<String, String>>,
}

impl FileSecretStore {
    /// Load a [`FileSecretStore`] from the JSON secrets located at the given
    /// path, or return an Error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJson`] if the secrets file is invalid.
    ///
    /// Returns [`Error::Io`] if the path can't be opened or read.
    pub async fn try_from_file(p: &str) -> Result<Self, Error> {
        let mut f = File::open(p).await?;
        let mut buf = vec![];
        f.read_to_end(&mut buf).await?;
        let secrets = serde_json::from_slice(&buf)?;
        Ok(Self { secrets })
    }
}

#[async_trait::async_trait]
impl SecretStore for FileSecretStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<SecretData, Error> {
        self.secrets
            .get(&format!("{namespace}/{name}"))
            .map(|data| {
                data.iter()
                    .map(|(k, v)| (k.clone(), v.clone().into_bytes()))
                    .collect()
            })
            .ok_or_else(|| Error::SecretNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }
}
