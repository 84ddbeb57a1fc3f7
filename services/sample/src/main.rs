use anyhow::Context as _;
use tracing::info;

use identity_core::tracing::init_tracing;
use identity_mongodb::IdentityStores;
use identity_sample::config::SampleConfig;
use identity_sample::infra::userinfo::HttpUserInfoClient;
use identity_sample::router::build_router;
use identity_sample::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SampleConfig::from_env();

    let stores = IdentityStores::connect(config.mongo_options())
        .await
        .context("failed to connect to MongoDB")?;

    let userinfo =
        HttpUserInfoClient::new(config.provider_endpoints(), config.userinfo_timeout())?;
    let state = AppState { stores, userinfo };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.sample_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!("sample service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
