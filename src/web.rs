#![cfg(feature = "web")]
#![cfg(not(tarpaulin_include))]

use fvs_dashboard::app;
use fvs_dashboard::fetch::DataSources;

/// Entry point for the dashboard server.
///
/// Source endpoints come from `FVS_GRID_URL`, `FVS_LIST_URL`, and
/// `FVS_RECORDS_URL` (local file paths under `data/` by default); the
/// listen port from `FVS_PORT`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let sources = DataSources::from_env();
    app::run(sources).await
}
