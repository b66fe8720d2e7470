mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod payment_client;
mod storage;
mod validation;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credit_leads_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; a missing DATABASE_URL refuses startup
    let config = Config::from_env()?;

    // Initialize database connection pool and bootstrap the schema
    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    // Payment provider is optional; the paid-investigation endpoint reports
    // 502 until it is configured
    let payment_client = match (
        config.payment_base_url.clone(),
        config.payment_api_token.clone(),
    ) {
        (Some(base_url), Some(token)) => {
            match payment_client::PaymentClient::new(base_url.clone(), token) {
                Ok(client) => {
                    tracing::info!("Payment client initialized: {}", base_url);
                    Some(client)
                }
                Err(e) => {
                    tracing::error!("Failed to initialize payment client: {}", e);
                    None
                }
            }
        }
        _ => {
            tracing::warn!("Payment provider not configured; paid investigations disabled");
            None
        }
    };

    // Build application state
    let app_state = Arc::new(handlers::AppState {
        db: db.pool.clone(),
        config: config.clone(),
        payment_client,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build form/admin routes with security layers
    let api_routes = Router::new()
        .route(
            "/api/consultation-requests",
            post(handlers::create_consultation_request).get(handlers::list_consultation_requests),
        )
        .route(
            "/api/credit-report-analysis",
            post(handlers::create_credit_report_analysis)
                .get(handlers::list_credit_report_analysis),
        )
        .route(
            "/api/credit-investigation-payment",
            post(handlers::create_credit_investigation_payment)
                .get(handlers::list_credit_investigation_orders),
        )
        .layer(
            ServiceBuilder::new()
                // Form submissions are small; 64KB is generous
                .layer(RequestBodyLimitLayer::new(64 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check bypassing rate limiting
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
