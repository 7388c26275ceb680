//! Shelf auth server - Main entry point.
//!
//! Starts the Actix-web server with bearer authentication and API key
//! management routes.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use shelf_auth::auth::{AuthEventLog, BearerAuthenticator, CredentialHasher, TracingAuthLog};
use shelf_auth::config::Config;
use shelf_auth::db::{DbPool, UserRepository};
use shelf_auth::services::KeyLifecycleManager;
use shelf_auth::{api, middleware, services};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL must be set");
            error!("  - In production, SHELF_KDF_ITERATIONS must not be weakened");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Shelf Auth Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let pool = DbPool::new(&config)
        .await
        .expect("Failed to connect to database");
    info!("Database connection established");

    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    info!("Database migrations complete");

    let users: Arc<dyn UserRepository> = Arc::new(pool.clone());
    let auth_log: Arc<dyn AuthEventLog> = Arc::new(TracingAuthLog);
    let hasher = CredentialHasher::new(config.kdf_iterations);
    info!("API keys hashed with {} PBKDF2 iterations", hasher.iterations());

    let authenticator = BearerAuthenticator::new(users.clone(), hasher, auth_log)
        .expect("Failed to initialize bearer authenticator");
    let key_manager = KeyLifecycleManager::new(users, hasher);

    let bind_address = config.bind_address();
    let worker_count = if config.is_development() {
        4
    } else {
        num_cpus::get()
    };
    info!(
        "Starting server at http://{} ({} workers)",
        bind_address, worker_count
    );

    HttpServer::new(move || {
        App::new()
            // Bearer auth runs inside the request logger; an upstream session
            // layer, when present, must wrap outside BearerAuth.
            .wrap(middleware::BearerAuth)
            .wrap(middleware::RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(authenticator.clone()))
            .app_data(web::Data::new(key_manager.clone()))
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_account_routes)
                    .configure(services::configure_api_key_routes)
                    .service(api::openapi::openapi_json),
            )
    })
    .workers(worker_count)
    .bind(&bind_address)?
    .run()
    .await
}
