use crate::api::routes;
use crate::config::SharedConfig;
use crate::solver::DynSolver;
use std::future::Future;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub group_name: String,
    pub solver: DynSolver,
}

pub fn new(
    config: SharedConfig,
    group_name: String,
    solver: DynSolver,
) -> impl Future<Output = hyper::Result<()>> {
    let bind_addr = config.api_bind_addr;
    axum::Server::bind(&bind_addr).serve(
        routes::new(AppState {
            config,
            group_name,
            solver,
        })
        .into_make_service(),
    )
}
