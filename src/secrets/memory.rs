use crate::error::Error;
use crate::secrets::{SecretData, SecretStore};
use std::collections::HashMap;

/// An in-memory implementation of [`SecretStore`], keyed by
/// `"namespace/name"`.
#[derive(Default, Debug, Clone)]
pub struct InMemorySecretStore {
    secrets: HashMap<String, SecretData>,
}

impl InMemorySecretStore {
    /// Insert a key/value entry, creating the named secret object if needed.
    pub fn insert(&mut self, namespace: &str, name: &str, key: &str, value: impl Into<Vec<u8>>) {
        self.secrets
            .entry(store_key(namespace, name))
            .or_default()
            .insert(key.to_string(), value.into());
    }
}

fn store_key(namespace: &str, name: &str) -> String {
    format!("{namespace}/{name}")
}

#[async_trait::async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<SecretData, Error> {
        self.secrets
            .get(&store_key(namespace, name))
            .cloned()
            .ok_or_else(|| Error::SecretNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }
}
