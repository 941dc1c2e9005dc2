//! Minimal DNSPod API client covering the record operations the solver needs.
//!
//! Speaks the legacy form-encoded DNSPod endpoints (`Domain.List`,
//! `Record.List`, `Record.Create`, `Record.Remove`). Every request carries the
//! caller-supplied `login_token` and a fixed response `format` parameter.
//! Responses share an envelope with a `status` object whose `code` is `"1"` on
//! success; anything else becomes a [`ProviderApiError::Status`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://dnsapi.cn";

/// Record line required by the API for newly created records (the "default"
/// line, which DNSPod names in Chinese).
pub const DEFAULT_RECORD_LINE: &str = "默认";

/// A failed call to the DNSPod API.
#[allow(clippy::module_name_repetitions)]
#[derive(thiserror::Error, Debug)]
pub enum ProviderApiError {
    /// The HTTP request itself failed, or the response body didn't parse.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status envelope.
    #[error("[{code}] {message}")]
    Status { code: String, message: String },
}

impl ProviderApiError {
    /// DNSPod reports an empty `Record.List` result as status code 10,
    /// "No records on the list".
    #[must_use]
    pub fn is_no_records(&self) -> bool {
        match self {
            ProviderApiError::Status { code, message } => {
                code == "10" || message.contains("No records")
            }
            ProviderApiError::Transport(_) => false,
        }
    }
}

/// Response envelope status.
#[derive(Deserialize, Debug, Clone)]
pub struct ApiStatus {
    pub code: String,
    pub message: String,
}

/// A domain visible to the authenticated account.
///
/// DNSPod encodes the id as a JSON number or a numeric string depending on
/// the endpoint, so it is normalized to a string and interpreted by the
/// caller.
#[derive(Deserialize, Debug, Clone)]
pub struct Domain {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A DNS resource record under a domain.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct Record {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub ttl: String,
    #[serde(default)]
    pub line: String,
}

#[derive(Deserialize, Debug)]
struct DomainListResponse {
    status: ApiStatus,
    #[serde(default)]
    domains: Vec<Domain>,
}

#[derive(Deserialize, Debug)]
struct RecordListResponse {
    status: ApiStatus,
    #[serde(default)]
    records: Vec<Record>,
}

#[derive(Deserialize, Debug)]
struct CreatedRecord {
    #[serde(deserialize_with = "id_string")]
    id: String,
}

#[derive(Deserialize, Debug)]
struct RecordCreateResponse {
    status: ApiStatus,
    record: Option<CreatedRecord>,
}

#[derive(Deserialize, Debug)]
struct StatusResponse {
    status: ApiStatus,
}

/// Accept an id encoded as either a JSON number or a string.
fn id_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Num(serde_json::Number),
        Str(String),
    }
    Ok(match IdRepr::deserialize(de)? {
        IdRepr::Num(n) => n.to_string(),
        IdRepr::Str(s) => s,
    })
}

/// An authenticated DNSPod API client.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
pub struct DnspodClient {
    http: reqwest::Client,
    base_url: String,
    login_token: String,
    format: String,
}

impl DnspodClient {
    #[must_use]
    pub fn new(login_token: impl Into<String>, format: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, login_token, format)
    }

    /// Build a client against an alternate API endpoint.
    #[must_use]
    pub fn with_base_url(
        base_url: impl Into<String>,
        login_token: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            login_token: login_token.into(),
            format: format.into(),
        }
    }

    /// List all domains visible to the account.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderApiError`] when the call or status envelope fails.
    pub async fn list_domains(&self) -> Result<Vec<Domain>, ProviderApiError> {
        let resp: DomainListResponse = self.post("Domain.List", &[]).await?;
        check_status(resp.status)?;
        Ok(resp.domains)
    }

    /// List records under a domain, filtered by relative record name.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderApiError`] when the call or status envelope fails.
    /// A domain with no records under the name surfaces as the "No records"
    /// status error; see [`ProviderApiError::is_no_records`].
    pub async fn list_records(
        &self,
        domain_id: &str,
        sub_domain: &str,
    ) -> Result<Vec<Record>, ProviderApiError> {
        let resp: RecordListResponse = self
            .post(
                "Record.List",
                &[("domain_id", domain_id), ("sub_domain", sub_domain)],
            )
            .await?;
        check_status(resp.status)?;
        Ok(resp.records)
    }

    /// Create a record under a domain, returning its provider-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderApiError`] when the call or status envelope fails.
    pub async fn create_record(
        &self,
        domain_id: &str,
        record: &Record,
    ) -> Result<String, ProviderApiError> {
        let resp: RecordCreateResponse = self
            .post(
                "Record.Create",
                &[
                    ("domain_id", domain_id),
                    ("sub_domain", &record.name),
                    ("record_type", &record.record_type),
                    ("record_line", &record.line),
                    ("value", &record.value),
                    ("ttl", &record.ttl),
                ],
            )
            .await?;
        check_status(resp.status)?;
        Ok(resp.record.map(|r| r.id).unwrap_or_default())
    }

    /// Delete a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderApiError`] when the call or status envelope fails.
    pub async fn remove_record(
        &self,
        domain_id: &str,
        record_id: &str,
    ) -> Result<(), ProviderApiError> {
        let resp: StatusResponse = self
            .post(
                "Record.Remove",
                &[("domain_id", domain_id), ("record_id", record_id)],
            )
            .await?;
        check_status(resp.status)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        action: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, ProviderApiError> {
        let url = format!("{}/{}", self.base_url, action);
        let mut params: Vec<(&str, &str)> = vec![
            ("login_token", self.login_token.as_str()),
            ("format", self.format.as_str()),
        ];
        params.extend_from_slice(extra);
        let resp = self.http.post(&url).form(&params).send().await?;
        Ok(resp.error_for_status()?.json::<T>().await?)
    }
}

fn check_status(status: ApiStatus) -> Result<(), ProviderApiError> {
    if status.code == "1" {
        Ok(())
    } else {
        Err(ProviderApiError::Status {
            code: status.code,
            message: status.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok_status() -> serde_json::Value {
        json!({"code": "1", "message": "Action completed successful"})
    }

    async fn client(server: &MockServer) -> DnspodClient {
        DnspodClient::with_base_url(server.uri(), "13,tok", "json")
    }

    #[tokio::test]
    async fn list_domains_sends_token_and_parses_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Domain.List"))
            .and(body_string_contains("login_token=13"))
            .and(body_string_contains("format=json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": ok_status(),
                "domains": [
                    {"id": 2317346, "name": "example.com"},
                    {"id": "1001", "name": "example.org"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let domains = client(&server).await.list_domains().await.unwrap();
        assert_eq!(domains.len(), 2);
        assert_eq!(domains[0].id, "2317346");
        assert_eq!(domains[1].id, "1001");
        assert_eq!(domains[0].name, "example.com");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Domain.List"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": {"code": "-1", "message": "Login failed"}
            })))
            .mount(&server)
            .await;

        let err = client(&server).await.list_domains().await.unwrap_err();
        assert!(
            matches!(&err, ProviderApiError::Status { code, .. } if code.as_str() == "-1"),
            "unexpected error: {err}"
        );
        assert!(!err.is_no_records());
    }

    #[tokio::test]
    async fn record_list_no_records_status_is_detectable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Record.List"))
            .and(body_string_contains("domain_id=1"))
            .and(body_string_contains("sub_domain=_acme-challenge"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": {"code": "10", "message": "No records on the list"}
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .list_records("1", "_acme-challenge")
            .await
            .unwrap_err();
        assert!(err.is_no_records());
    }

    #[tokio::test]
    async fn create_record_posts_attributes_and_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Record.Create"))
            .and(body_string_contains("domain_id=1"))
            .and(body_string_contains("sub_domain=_acme-challenge"))
            .and(body_string_contains("record_type=TXT"))
            .and(body_string_contains("ttl=600"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": ok_status(),
                "record": {"id": "50909851", "name": "_acme-challenge", "status": "enable"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let record = Record {
            record_type: "TXT".to_string(),
            name: "_acme-challenge".to_string(),
            value: "proof".to_string(),
            ttl: "600".to_string(),
            line: DEFAULT_RECORD_LINE.to_string(),
            ..Record::default()
        };
        let id = client(&server)
            .await
            .create_record("1", &record)
            .await
            .unwrap();
        assert_eq!(id, "50909851");
    }

    #[tokio::test]
    async fn remove_record_posts_record_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Record.Remove"))
            .and(body_string_contains("domain_id=1"))
            .and(body_string_contains("record_id=50909851"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": ok_status()
            })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .remove_record("1", "50909851")
            .await
            .unwrap();
    }
}
