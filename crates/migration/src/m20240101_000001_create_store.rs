//! Create `store` table.
//!
//! The unique key on `name` is the single source of name conflicts;
//! the service layer maps its violation to a Conflict response.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Store::Table)
                    .if_not_exists()
                    .col(pk_auto(Store::Id))
                    .col(string_len(Store::Name, 128).unique_key().not_null())
                    .col(string_len(Store::Address, 512).not_null())
                    .col(time(Store::OpeningTime).not_null())
                    .col(time(Store::ClosingTime).not_null())
                    .col(float(Store::FriendlinessLevel).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Store::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Store { Table, Id, Name, Address, OpeningTime, ClosingTime, FriendlinessLevel }
