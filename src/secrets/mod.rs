//! Secret storage for DNS provider credentials.
//!
//! Per-challenge configuration references credentials by secret name and key
//! rather than carrying them inline. The [`SecretStore`] trait is the lookup
//! boundary: one fetch of a named secret object within a namespace, no
//! caching (client memoization happens one level up, in the
//! [solver][`crate::solver`], keyed on the derived client).
//!
//! Two implementations are provided, [`memory::InMemorySecretStore`] and
//! [`file::FileSecretStore`]. The former is useful for tests and local
//! development; the latter loads its contents from a JSON file once at
//! startup.

use crate::error::Error;
use std::collections::HashMap;
use std::sync::Arc;

pub mod file;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use file::FileSecretStore;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemorySecretStore;

/// Key/value payload of a single named secret object.
pub type SecretData = HashMap<String, Vec<u8>>;

/// `DynSecretStore` is a type alias for a shared [`SecretStore`] handle.
#[allow(clippy::module_name_repetitions)]
pub type DynSecretStore = Arc<dyn SecretStore + Send + Sync>;

/// An async trait describing the external secret store the solver fetches
/// provider credentials from.
#[async_trait::async_trait]
pub trait SecretStore {
    /// Fetch the named secret object within `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SecretNotFound`] when the store has no such object.
    async fn get(&self, namespace: &str, name: &str) -> Result<SecretData, Error>;
}
