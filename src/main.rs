//! Service entry-point: wires the directory core, its adapters, and the
//! HTTP server.

use std::env;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use account_directory::domain::{AccountDirectory, StandardPasswordPolicy};
use account_directory::inbound::http::health::HealthState;
use account_directory::inbound::http::{routes, HttpState};
use account_directory::outbound::hashing::Argon2PasswordHasher;
use account_directory::outbound::persistence::{DbPool, DieselAccountStore, PoolConfig};
#[cfg(debug_assertions)]
use account_directory::ApiDoc;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PASSWORD_MIN_LENGTH: usize = 6;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
    let password_min_length = match env::var("PASSWORD_MIN_LENGTH") {
        Ok(raw) => raw.parse().map_err(|e| {
            std::io::Error::other(format!("invalid PASSWORD_MIN_LENGTH {raw:?}: {e}"))
        })?,
        Err(_) => DEFAULT_PASSWORD_MIN_LENGTH,
    };

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;

    let directory = AccountDirectory::new(
        Arc::new(DieselAccountStore::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(StandardPasswordPolicy::new().with_min_length(password_min_length)),
    );
    let state = web::Data::new(HttpState::new(directory));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .configure(routes::configure);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(&bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
