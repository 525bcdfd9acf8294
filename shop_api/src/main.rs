// shop_api/src/main.rs

// Declare modules for the application
mod config;
mod db;
mod errors;
mod models;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::db::PgShopStore;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

fn init_tracing(json: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")); // RUST_LOG override
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);
  init_tracing(app_config.log_json);
  tracing::info!("Starting shop server...");

  let db_pool = PgPoolOptions::new()
    .max_connections(app_config.database_max_connections)
    .connect(&app_config.database_url)
    .await
    .context("Failed to connect to the database")?;
  tracing::info!("Successfully connected to the database.");

  if app_config.run_migrations {
    sqlx::migrate!("./migrations")
      .run(&db_pool)
      .await
      .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied.");
  }

  let session_key = app_config.session_key()?;
  let cookie_secure = app_config.session_cookie_secure;
  let app_state = AppState::new(Arc::new(PgShopStore::new(db_pool)), app_config.clone());

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .app_data(web::json_config())
      .app_data(web::path_config())
      .wrap(web::session_middleware(session_key.clone(), cookie_secure))
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await?;

  Ok(())
}
