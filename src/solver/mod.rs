//! Challenge solver interface and the DNSPod implementation.
//!
//! A solver exposes exactly four operations to the challenge orchestration
//! layer: an identity [`name`][`Solver::name`], a one-time
//! [`initialize`][`Solver::initialize`] hook, and the two DNS-01 lifecycle
//! operations [`present`][`Solver::present`] and [`cleanup`][`Solver::cleanup`]
//! that create and remove the proof TXT record.

mod config;
mod dnspod;
mod record;

pub use config::{load_config, SecretKeySelector, SolverConfig, DEFAULT_TTL};
#[allow(clippy::module_name_repetitions)]
pub use dnspod::DnspodSolver;
pub use record::extract_record_name;

use crate::api::model::ChallengeRequest;
use crate::config::SharedConfig;
use crate::error::Error;
use std::sync::Arc;

/// `DynSolver` is a type alias for a shared [`Solver`] handle.
#[allow(clippy::module_name_repetitions)]
pub type DynSolver = Arc<dyn Solver>;

/// The operations a DNS-01 solver exposes to the challenge orchestration
/// layer.
#[async_trait::async_trait]
pub trait Solver: Send + Sync {
    /// The name this solver is referenced by within the webhook's API group.
    fn name(&self) -> &'static str;

    /// Called once at process start. Establishes whatever clients are needed
    /// to reach the external secret store; performs no provider API calls.
    async fn initialize(&mut self, config: &SharedConfig) -> Result<(), Error>;

    /// Create the TXT record proving control of the challenge FQDN.
    ///
    /// Must tolerate being invoked multiple times with identical inputs.
    async fn present(&self, ch: &ChallengeRequest) -> Result<(), Error>;

    /// Remove the TXT record whose value equals the challenge key. Records
    /// sharing the name but carrying a different value are left alone so that
    /// concurrent validations of the same name don't interfere.
    async fn cleanup(&self, ch: &ChallengeRequest) -> Result<(), Error>;
}
