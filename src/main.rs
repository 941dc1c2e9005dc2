use anyhow::{anyhow, Result};
use dnspod_webhook::solver::{DnspodSolver, DynSolver, Solver};
use dnspod_webhook::zone::RecursiveZoneResolver;
use dnspod_webhook::{Config, SharedConfig};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    // The API group this webhook registers its solvers under. Startup is the
    // only place a missing setting is fatal.
    let group_name =
        std::env::var("GROUP_NAME").map_err(|_| anyhow!("GROUP_NAME must be specified"))?;

    let mut first_args = std::env::args().take(2);
    let (program_name, config_file) = (
        first_args.next().unwrap_or("dnspod-webhook".to_string()),
        first_args.next(),
    );

    let config = config_init(&program_name, config_file)?;

    let mut solver = DnspodSolver::new(zone_resolver_init(&config)?);
    solver.initialize(&config).await?;
    let solver: DynSolver = Arc::new(solver);

    tracing::info!(
        "registered solver \"{}\" under group \"{group_name}\"",
        solver.name()
    );
    tracing::info!("API listening on {}", &config.api_bind_addr);
    let api_server = dnspod_webhook::api::new(config.clone(), group_name, solver);
    let api_handle = tokio::spawn(api_server);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        Ok(api_res) = api_handle => {
            if let Err(err) = api_res {
                return Err(err.into());
            }
        }
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dnspod_webhook=info".into()),
        )
        .init();
}

fn config_init(program_name: &str, config_file: Option<String>) -> Result<SharedConfig> {
    match config_file {
        None => Err(anyhow!("usage: {program_name} /path/to/config.json")),
        Some(config_file) => {
            tracing::debug!("loaded config from {config_file}");
            let config = Config::try_from_file(&config_file)?;
            Ok(Arc::new(config))
        }
    }
}

fn zone_resolver_init(config: &SharedConfig) -> Result<Arc<RecursiveZoneResolver>> {
    let resolver = if config.recursive_nameservers.is_empty() {
        RecursiveZoneResolver::from_system_conf()?
    } else {
        RecursiveZoneResolver::with_nameservers(&config.recursive_nameservers)?
    };
    Ok(Arc::new(resolver))
}
