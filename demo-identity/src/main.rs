use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use identity_core_axum::{require_api_key_auth, require_bearer_auth};

mod handlers;

use crate::handlers::{
    create_api_key, list_keys, login, me, register, revoke_key, service_status, social_login,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create the credential tables and validate their schema
    identity_core_axum::init().await?;

    let app = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/social", post(social_login))
        .nest(
            "/api-keys",
            Router::new()
                .route("/", post(create_api_key).get(list_keys))
                .route("/{id}", axum::routing::delete(revoke_key))
                .route_layer(from_fn(require_bearer_auth)),
        )
        .route("/me", get(me).route_layer(from_fn(require_bearer_auth)))
        .route(
            "/service/status",
            get(service_status).route_layer(from_fn(require_api_key_auth)),
        );

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
