//! HTTP webhook surface for the challenge orchestration framework.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the
//!   service is operational.
//!
//! ## `/` (GET)
//!
//!   Returns a discovery document naming the API group this webhook was
//!   registered under and the solvers it carries:
//!
//!   ```json
//!   { "group": "acme.example.com", "solvers": ["dnspod"] }
//!   ```
//!
//! ## `/present` (POST)
//!
//!   Expects a challenge request body of the form:
//!
//!   ```json
//!   {
//!     "resourceNamespace": "default",
//!     "resolvedFQDN": "_acme-challenge.example.com.",
//!     "resolvedZone": "example.com.",
//!     "key": "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
//!     "config": { "apiID": 13, "apiTokenSecretRef": { "name": "dnspod-credentials", "key": "api-token" } }
//!   }
//!   ```
//!
//!   Creates the proof TXT record at the provider and returns HTTP 200 with
//!   `{"solver":"dnspod"}`. Tolerates repeated invocation with the same body.
//!
//! ## `/cleanup` (POST)
//!
//!   Same request body as `/present`. Deletes every TXT record under the
//!   challenge name whose value equals `key`, leaving records with other
//!   values untouched, and returns HTTP 200 with `{"solver":"dnspod"}`.
//!   A provider answer of "no records" counts as success.

mod api_error;
pub mod model;
mod routes;
pub mod server;

pub use server::new;
