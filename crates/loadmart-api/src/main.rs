//! Loadmart API server entry point.

use std::sync::{Arc, Mutex};

use loadmart_api::config::ServerConfig;
use loadmart_api::error::AppError;
use loadmart_api::latency::{Endpoint, SimulatedLatency};
use loadmart_api::routes;
use loadmart_api::state::AppState;
use loadmart_checkout::payment::SimulatedPaymentGateway;
use loadmart_checkout::shop::{Shop, ShopDeps};
use loadmart_core::clock::SystemClock;
use loadmart_core::rng::{DeterministicRng, SystemRng};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Loadmart API server");

    // Read configuration from environment.
    let config = ServerConfig::from_env()?;

    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = match config.rng_seed {
        Some(seed) => Arc::new(Mutex::new(SystemRng::seeded(seed))),
        None => Arc::new(Mutex::new(SystemRng::from_entropy())),
    };

    // Checkout latency is spent while paying, outside the exclusive section.
    let mut payments = SimulatedPaymentGateway::new(config.payment_failure_rate, rng.clone());
    if config.simulate_latency {
        payments = payments.with_processing_delay(Endpoint::Checkout.range_ms());
    }

    let shop = Shop::new(
        config.shop.clone(),
        ShopDeps {
            clock: Arc::new(SystemClock),
            rng,
            payments: Arc::new(payments),
        },
    )?;
    tracing::info!(
        products = config.shop.catalog.product_count,
        simulate_latency = config.simulate_latency,
        payment_failure_rate = config.payment_failure_rate,
        "catalog generated"
    );

    // Build application state.
    let app_state = AppState::new(
        Arc::new(shop),
        SimulatedLatency::new(config.simulate_latency),
    );

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr = config.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
