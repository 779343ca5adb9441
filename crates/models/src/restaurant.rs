use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::restaurant_pizza;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    RestaurantPizzas,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::RestaurantPizzas => Entity::has_many(restaurant_pizza::Entity).into(),
        }
    }
}

impl Related<restaurant_pizza::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantPizzas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, name: &str, address: &str) -> Result<Model, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if address.trim().is_empty() {
        return Err(ModelError::Validation("address required".into()));
    }
    let am = ActiveModel {
        name: Set(name.to_string()),
        address: Set(address.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Delete a restaurant together with every association row that points at
/// it, in one transaction.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ModelError> {
    let found = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or_else(|| ModelError::not_found("Restaurant"))?;

    let txn = db.begin().await.map_err(|e| ModelError::Db(e.to_string()))?;
    restaurant_pizza::Entity::delete_many()
        .filter(restaurant_pizza::Column::RestaurantId.eq(found.id))
        .exec(&txn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Entity::delete_by_id(found.id)
        .exec(&txn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    txn.commit().await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
