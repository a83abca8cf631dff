use dotenvy::dotenv;
use storefront::{
    api::{self, AppState},
    config::{self, database},
    core::settings,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::store::load_app_configuration()?;

    // 4. Connect to the database and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database schema ready."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Fail fast on store settings that cannot produce a valid message
    let defaults = settings::load_store_defaults(&db, &app_config.store).await?;
    info!(store = %defaults.store_name, "Loaded store defaults.");

    // 6. Serve
    let bind_address = app_config.server.bind_address.clone();
    let app = api::create_router(AppState::new(db, app_config));
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", bind_address, e))?;
    info!("Listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
