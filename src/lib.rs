//! DNSPod Webhook
//!
//! A DNS-01 challenge solver webhook bridging a certificate-management
//! control plane to the [DNSPod] record API, for [RFC-8555][RFC-8555]
//! [DNS-01] X509 certificate issuance on DNSPod-hosted zones.
//!
//! The orchestration framework `POST`s challenge requests to the
//! [HTTP API][crate::api]; the [solver][crate::solver] resolves provider
//! credentials from a [secret store][crate::secrets], memoizes one
//! [DNSPod client][crate::dnspod] per account, discovers the
//! [authoritative zone][crate::zone], and creates or removes the proof TXT
//! record.
//!
//! [DNSPod]: https://www.dnspod.cn
//! [RFC-8555]: https://www.rfc-editor.org/rfc/rfc8555
//! [DNS-01]: https://www.rfc-editor.org/rfc/rfc8555#section-8.4
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod dnspod;
pub mod error;
pub mod secrets;
pub mod solver;
pub mod zone;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use secrets::{FileSecretStore, InMemorySecretStore};
pub use solver::{DnspodSolver, Solver};
