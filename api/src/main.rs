//! SessionGuard API server entry point

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sg_api::{create_app, AppState, Config};
use sg_core::repositories::{
    InMemoryRevocationRepository, InMemoryUserRepository, RevocationRepository, UserRepository,
};
use sg_infra::database::{DatabasePool, MySqlRevocationRepository, MySqlUserRepository};
use sg_infra::tasks::{RevocationSweepConfig, RevocationSweeper};
use sg_shared::{config::LogFormat, LoggingConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&config.app.logging);

    info!(
        environment = %config.app.environment,
        "Starting SessionGuard API server"
    );

    if config.is_production() && config.app.auth.jwt.is_using_default_secret() {
        bail!("JWT_SECRET must be set in production");
    }

    match config.app.database.backend {
        StorageBackend::Mysql => run_with_mysql(&config).await,
        StorageBackend::Memory => {
            warn!("Using in-memory storage; users and revocations are lost on restart");
            serve(
                Arc::new(InMemoryRevocationRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
                &config,
            )
            .await
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

async fn run_with_mysql(config: &Config) -> anyhow::Result<()> {
    let pool = DatabasePool::new(config.app.database.clone())
        .await
        .context("Failed to connect to MySQL")?;
    pool.bootstrap_schema()
        .await
        .context("Failed to bootstrap database schema")?;
    info!("{}", pool.get_statistics());

    let revocations = Arc::new(MySqlRevocationRepository::new(pool.get_pool().clone()));
    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));

    let result = serve(revocations, users, config).await;
    pool.close().await;
    result
}

async fn serve<R, U>(revocations: Arc<R>, users: Arc<U>, config: &Config) -> anyhow::Result<()>
where
    R: RevocationRepository + 'static,
    U: UserRepository + 'static,
{
    let state = AppState::new(revocations, users, &config.app.auth)
        .context("Failed to initialise token services")?;
    let state = web::Data::new(state);

    let sweeper = Arc::new(RevocationSweeper::new(
        state.token_service.revocations().clone(),
        RevocationSweepConfig::from(&config.app.auth.revocation),
    ));
    let sweep_task = sweeper.start_background_task();

    let bind_address = config.app.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let environment = config.app.environment;
    let cors = config.cors.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), environment, &cors));
    if config.app.server.workers > 0 {
        server = server.workers(config.app.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(task) = sweep_task {
        task.abort();
    }
    info!("Server stopped");
    Ok(())
}
