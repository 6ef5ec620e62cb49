use f1racing::{
    routes::{init_tracing, make_app},
    utils::{config::Config, state::AppState},
};
use std::{error::Error, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    let config = Config::init()?;
    init_tracing(&config.log_level);
    info!("Configuration loaded successfully");

    let state = Arc::new(AppState::init(config)?);
    state.start();
    let app = make_app(Arc::clone(&state));

    let listener = TcpListener::bind(&state.config.bind_addr).await?;
    info!("Listening on http://{}", state.config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    state.shutdown();
    Ok(())
}
