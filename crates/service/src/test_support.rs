#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_init(|| async {
            match models::db::connect().await {
                Ok(db) => {
                    if let Err(e) = migration::Migrator::up(&db, None).await {
                        eprintln!("migrate up failed: {}", e);
                    }
                }
                Err(e) => eprintln!("cannot connect for migration: {}", e),
            }
        })
        .await;

    // Return a fresh connection for the current test's runtime
    let db = models::db::connect().await?;
    Ok(db)
}
