//! Create `pizza` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pizza::Table)
                    .if_not_exists()
                    .col(pk_auto(Pizza::Id))
                    .col(string(Pizza::Name).not_null())
                    .col(string(Pizza::Ingredients).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pizza::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pizza { Table, Id, Name, Ingredients }
