use crate::api::model::ChallengeRequest;
use crate::config::SharedConfig;
use crate::dnspod::DnspodClient;
use crate::error::Error;
use crate::secrets::{DynSecretStore, FileSecretStore};
use crate::solver::config::{load_config, SolverConfig};
use crate::solver::record::{extract_record_name, new_txt_record};
use crate::solver::Solver;
use crate::zone::{un_fqdn, ZoneResolver};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// DNS-01 challenge solver for zones hosted on DNSPod.
///
/// Credentials are referenced per-challenge (secret name + key within the
/// challenge's namespace) and resolved through the configured
/// [`SecretStore`][`crate::secrets::SecretStore`]. Each distinct DNSPod
/// account id gets one memoized API client, built on first use and kept for
/// the life of the process.
///
/// Known limitation: the client cache keys on account id alone. If the
/// referenced secret's value rotates without a restart, the cached client
/// keeps using the old token.
#[allow(clippy::module_name_repetitions)]
pub struct DnspodSolver {
    secrets: Option<DynSecretStore>,
    zone_resolver: Arc<dyn ZoneResolver>,
    clients: RwLock<HashMap<i64, Arc<DnspodClient>>>,
    api_base_url: Option<String>,
}

impl DnspodSolver {
    #[must_use]
    pub fn new(zone_resolver: Arc<dyn ZoneResolver>) -> Self {
        Self {
            secrets: None,
            zone_resolver,
            clients: RwLock::new(HashMap::new()),
            api_base_url: None,
        }
    }

    /// Use the given secret store instead of loading one from the bootstrap
    /// config at initialize time.
    #[must_use]
    pub fn with_secret_store(mut self, secrets: DynSecretStore) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Point provider API calls at an alternate endpoint (e.g. a proxy).
    #[must_use]
    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = Some(base_url.into());
        self
    }

    /// Decode the challenge config and return the account's API client,
    /// building and memoizing one on first use.
    ///
    /// A cache hit never contacts the secret store. Racing misses for the
    /// same account may each build a client; the last insert wins, which is
    /// harmless since construction is a local object build.
    async fn client_for(
        &self,
        ch: &ChallengeRequest,
    ) -> Result<(Arc<DnspodClient>, SolverConfig), Error> {
        let cfg = load_config(ch.config.as_ref())?;

        {
            let clients = self.clients.read().await;
            if let Some(client) = clients.get(&cfg.api_id) {
                return Ok((Arc::clone(client), cfg));
            }
        }

        let secrets = self.secrets.as_ref().ok_or(Error::NotInitialized)?;
        let secret_ref = &cfg.api_token_secret_ref;
        let data = secrets.get(&ch.resource_namespace, &secret_ref.name).await?;
        let api_token = data
            .get(&secret_ref.key)
            .ok_or_else(|| Error::SecretKeyMissing {
                namespace: ch.resource_namespace.clone(),
                name: secret_ref.name.clone(),
                key: secret_ref.key.clone(),
            })?;

        let login_token = format!("{},{}", cfg.api_id, String::from_utf8_lossy(api_token));
        let client = Arc::new(match &self.api_base_url {
            Some(base_url) => DnspodClient::with_base_url(base_url, login_token, "json"),
            None => DnspodClient::new(login_token, "json"),
        });
        self.clients
            .write()
            .await
            .insert(cfg.api_id, Arc::clone(&client));

        Ok((client, cfg))
    }

    /// Resolve the provider-side domain id for the challenge's zone.
    async fn domain_id(&self, client: &DnspodClient, zone: &str) -> Result<String, Error> {
        let domains = client.list_domains().await?;
        let auth_zone = self.zone_resolver.find_zone_by_fqdn(zone).await?;

        let id = domains
            .iter()
            .find(|domain| domain.name == un_fqdn(&auth_zone))
            .and_then(|domain| domain.id.parse::<i64>().ok())
            .unwrap_or(0);
        if id == 0 {
            return Err(Error::DomainNotFound {
                auth_zone,
                zone: zone.to_string(),
            });
        }
        Ok(id.to_string())
    }
}

#[async_trait::async_trait]
impl Solver for DnspodSolver {
    fn name(&self) -> &'static str {
        "dnspod"
    }

    async fn initialize(&mut self, config: &SharedConfig) -> Result<(), Error> {
        if self.secrets.is_none() {
            let store = FileSecretStore::try_from_file(&config.secrets_path).await?;
            self.secrets = Some(Arc::new(store));
        }
        Ok(())
    }

    async fn present(&self, ch: &ChallengeRequest) -> Result<(), Error> {
        let (client, cfg) = self.client_for(ch).await?;
        let domain_id = self.domain_id(&client, &ch.resolved_zone).await?;

        let record = new_txt_record(&ch.resolved_zone, &ch.resolved_fqdn, &ch.key, cfg.ttl);
        tracing::debug!(
            "presenting TXT record \"{}\" in domain {domain_id}",
            record.name
        );
        client.create_record(&domain_id, &record).await?;
        Ok(())
    }

    async fn cleanup(&self, ch: &ChallengeRequest) -> Result<(), Error> {
        let (client, _) = self.client_for(ch).await?;
        let domain_id = self.domain_id(&client, &ch.resolved_zone).await?;

        let record_name = extract_record_name(&ch.resolved_fqdn, &ch.resolved_zone);
        let records = match client.list_records(&domain_id, &record_name).await {
            Ok(records) => records,
            Err(err) if err.is_no_records() => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        for record in &records {
            if record.value != ch.key {
                continue;
            }
            tracing::debug!("removing TXT record {} from domain {domain_id}", record.id);
            client.remove_record(&domain_id, &record.id).await?;
        }
        Ok(())
    }
}
