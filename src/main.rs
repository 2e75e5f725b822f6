// src/main.rs
mod database;
mod dtos;
mod error;
mod handlers;
mod models;
mod repository;
mod routes;
mod services;
mod state;
mod validation;

use axum::{routing::get, Router};
use dotenvy::dotenv;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::fmt::init as tracing_init;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_init();

    // Load environment variables
    dotenv().ok();

    // Create database pool and bring the schema up to date
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db_pool = database::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");
    database::run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");

    // Create application state
    let app_state = state::AppState::new(db_pool);

    // Build application under /api base path
    let api = routes::create_router()
        .route("/", get(|| async { "Product Catalog API" }))
        .route("/health", get(health_check));

    let app = Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server with HOST/PORT env overrides
    let host_str = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let host: IpAddr = host_str.parse().unwrap_or_else(|_| IpAddr::from([127, 0, 0, 1]));
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from((host, port));

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!("Server running on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
    }
}

async fn health_check() -> &'static str {
    "OK"
}
