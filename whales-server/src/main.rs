//! A calendar server for the whales client.

/// API error responses
mod error;

/// Request handlers
mod handlers;

/// Shared request state
mod state;

use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use state::State;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{limit, timeout, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Serve commit calendars over HTTP
#[derive(Debug, Parser)]
struct Config {
    /// Address to listen on
    #[clap(long, env, default_value = "127.0.0.1:8000")]
    address: String,

    /// Request body size limit, in bytes
    #[clap(long, env, default_value = "65536")]
    body_limit: usize,

    /// Request timeout, in seconds
    #[clap(long, env, default_value = "5", value_parser = duration_parser)]
    request_timeout: Duration,

    /// How many days the active game spans, ending at startup
    #[clap(long, env, default_value = "30")]
    game_days: i64,
}

/// Read a whole number of seconds from the command line.
fn duration_parser(s: &str) -> Result<Duration, std::num::ParseIntError> {
    s.parse().map(Duration::from_secs)
}

#[tokio::main]
async fn main() {
    let options = Config::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = State::new(options.game_days);

    let app = Router::new()
        .route("/", get(handlers::health::handler))
        .route("/api/v2/graphql", post(handlers::calendar::handler))
        .layer(trace::TraceLayer::new_for_http())
        .layer(limit::RequestBodyLimitLayer::new(options.body_limit))
        .layer(timeout::TimeoutLayer::new(options.request_timeout))
        .with_state(state);

    let listener = TcpListener::bind(options.address).await.unwrap();
    tracing::info!(address = ?listener.local_addr(), "listening");

    axum::serve(listener, app).await.unwrap();
}
