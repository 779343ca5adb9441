use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // RestaurantPizza: index on restaurant_id (cascade delete scans)
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_pizza_restaurant")
                    .table(RestaurantPizza::Table)
                    .col(RestaurantPizza::RestaurantId)
                    .to_owned(),
            )
            .await?;

        // RestaurantPizza: index on pizza_id
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_pizza_pizza")
                    .table(RestaurantPizza::Table)
                    .col(RestaurantPizza::PizzaId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_restaurant_pizza_restaurant")
                    .table(RestaurantPizza::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_restaurant_pizza_pizza")
                    .table(RestaurantPizza::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum RestaurantPizza { Table, RestaurantId, PizzaId }
