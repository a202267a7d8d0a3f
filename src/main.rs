use chrono::Utc;
use dotenvy::dotenv;
use helpdesk::{
    config::{database, settings},
    core::{auto_close, identity, stats},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal: env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load service settings
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!(
        "Settings loaded: auto-close after {} days.",
        settings.auto_close_after_days
    );

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed roles named in the settings file
    let seeded = identity::ensure_roles(&db, &settings.seed_roles).await?;
    if seeded > 0 {
        info!("Seeded {} roles.", seeded);
    }

    // 6. Close tickets abandoned by their customers
    let report =
        auto_close::close_inactive_tickets(&db, Utc::now(), settings.inactivity_window())
            .await
            .inspect_err(|e| error!("Auto-close sweep failed: {}", e))?;
    info!("{}", auto_close::format_auto_close_summary(&report));

    // 7. Report dashboard counts
    let dashboard = stats::get_dashboard_stats(&db).await?;
    info!(
        total = dashboard.total,
        open = dashboard.open,
        resolved = dashboard.resolved,
        urgent = dashboard.urgent,
        "Ticket dashboard"
    );

    Ok(())
}
