//! Create `supplier` table.
//!
//! Suppliers belong to exactly one store; deleting a store
//! cascade-deletes its suppliers.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Supplier::Table)
                    .if_not_exists()
                    .col(pk_auto(Supplier::Id))
                    .col(string_len(Supplier::Name, 128).not_null())
                    .col(string_len(Supplier::PhoneNumber, 32).not_null())
                    .col(float(Supplier::FriendlinessLevel).not_null())
                    .col(integer(Supplier::StoreId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supplier_store")
                            .from(Supplier::Table, Supplier::StoreId)
                            .to(Store::Table, Store::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Supplier::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Supplier { Table, Id, Name, PhoneNumber, FriendlinessLevel, StoreId }

#[derive(DeriveIden)]
enum Store { Table, Id }
