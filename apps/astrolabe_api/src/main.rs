use astrolabe_api::{server, App};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = astrolabe_config::load_service_config()?;
    let app = App::from_config(&cfg)?;
    server::serve(Arc::new(app), &cfg.server.bind).await
}
