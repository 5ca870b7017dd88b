use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Supplier: index on store_id for the per-store supplier scan
        manager
            .create_index(
                Index::create()
                    .name("idx_supplier_store")
                    .table(Supplier::Table)
                    .col(Supplier::StoreId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_supplier_store").table(Supplier::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Supplier { Table, StoreId }
