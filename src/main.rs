use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use clubdesk_server::config::Config;
use clubdesk_server::routes::create_routes;
use clubdesk_server::state::AppState;
use clubdesk_server::store::PgStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations run successfully");

    let state = AppState::new(Arc::new(PgStore::new(pool)));
    let app: Router = create_routes(state);

    tracing::info!("Server running at http://{}", config.bind_addr);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
