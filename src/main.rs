use library_catalog::{
    adapters::observers::{LoanActivityLogger, LoanRegister, StatisticsObserver},
    adapters::postgres::PostgresItemRepository,
    application::catalog::{self, CatalogError, ServiceDependencies},
    config::AppConfig,
    domain::{Category, ItemDraft, Medium, legacy::LegacyItemRecord},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 起動時に登録するデモ用の資料
fn demo_drafts() -> Vec<ItemDraft> {
    vec![
        ItemDraft::new("1984", "George Orwell", Category::Fiction, Medium::Physical),
        ItemDraft::new(
            "Sapiens",
            "Yuval Noah Harari",
            Category::NonFiction,
            Medium::Digital,
        ),
        ItemDraft::new(
            "One Hundred Years of Solitude",
            "Gabriel García Márquez",
            Category::Fiction,
            Medium::Physical,
        ),
    ]
}

async fn seed_demo(deps: &ServiceDependencies) -> Result<(), CatalogError> {
    for draft in demo_drafts() {
        let title = draft.title.clone();
        match catalog::admit_item(deps, draft).await {
            Ok(admission) => {
                tracing::info!(item_id = ?admission.item.id(), title = %title, "demo item admitted")
            }
            // 再起動時は既に登録済み
            Err(CatalogError::InvalidOperation(reason)) => {
                tracing::debug!(title = %title, reason = %reason, "demo item skipped")
            }
            Err(e) => return Err(e),
        }
    }

    // 旧システムから貸出中のまま移行された資料
    let legacy = LegacyItemRecord {
        on_loan: true,
        ..LegacyItemRecord::new("El Aleph", "Jorge Luis Borges", "cuento", "tapa blanda")
    };
    match catalog::import_legacy_item(deps, &legacy).await {
        Ok(admission) => {
            tracing::info!(item_id = ?admission.item.id(), title = %legacy.name, "legacy item imported")
        }
        Err(CatalogError::InvalidOperation(reason)) => {
            tracing::debug!(title = %legacy.name, reason = %reason, "legacy item skipped")
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    // Initialize adapters
    let item_repository = Arc::new(PostgresItemRepository::new(pool.clone()));
    let deps = ServiceDependencies::new(item_repository);

    let statistics = Arc::new(StatisticsObserver::new());
    deps.notification_hub
        .subscribe(Arc::new(LoanActivityLogger::new()));
    deps.notification_hub.subscribe(statistics.clone());
    let loan_register = Arc::new(LoanRegister::new());
    deps.notification_hub.subscribe(loan_register.clone());

    if config.catalog.seed_demo {
        seed_demo(&deps).await?;
    }

    let summary = catalog::catalog_statistics(&deps).await?;
    tracing::info!(
        statistics = %serde_json::to_string(&summary)?,
        activity = %serde_json::to_string(&statistics.snapshot())?,
        active_loans = loan_register.active_loans(),
        overdue_loans = loan_register.overdue(chrono::Utc::now()).len(),
        "catalog ready"
    );

    pool.close().await;
    tracing::info!("database pool closed");

    Ok(())
}
