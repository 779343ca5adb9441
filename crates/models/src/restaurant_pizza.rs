use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::{pizza, restaurant, serialize};

/// Inclusive price bounds for an association row.
pub const PRICE_MIN: i32 = 1;
pub const PRICE_MAX: i32 = 30;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant_pizza")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Restaurant,
    Pizza,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Restaurant => Entity::belongs_to(restaurant::Entity)
                .from(Column::RestaurantId)
                .to(restaurant::Column::Id)
                .into(),
            Relation::Pizza => Entity::belongs_to(pizza::Entity)
                .from(Column::PizzaId)
                .to(pizza::Column::Id)
                .into(),
        }
    }
}

impl Related<restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<pizza::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pizza.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_price(price: i32) -> Result<(), ModelError> {
    if !(PRICE_MIN..=PRICE_MAX).contains(&price) {
        return Err(ModelError::Validation("Price must be between 1 and 30".into()));
    }
    Ok(())
}

/// Factory for association rows. An out-of-range price never reaches the
/// insert, and the insert runs in its own transaction so a failure leaves
/// no partial row behind.
pub async fn create(
    db: &DatabaseConnection,
    price: i32,
    restaurant_id: i32,
    pizza_id: i32,
) -> Result<Model, ModelError> {
    validate_price(price)?;

    let txn = db.begin().await.map_err(|e| ModelError::Db(e.to_string()))?;
    let am = ActiveModel {
        price: Set(price),
        restaurant_id: Set(restaurant_id),
        pizza_id: Set(pizza_id),
        ..Default::default()
    };
    let created = match am.insert(&txn).await {
        Ok(model) => model,
        Err(e) => {
            let _ = txn.rollback().await;
            return Err(ModelError::Db(e.to_string()));
        }
    };
    txn.commit().await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(created)
}

pub async fn find_by_restaurant(
    db: &DatabaseConnection,
    restaurant_id: i32,
) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// One-level expansion for responses: the association's scalar fields plus
/// nested `restaurant` and `pizza` objects. Deliberately stops there; the
/// relationship cycle means anything deeper would never terminate.
pub fn expanded(
    rp: &Model,
    restaurant: &restaurant::Model,
    pizza: &pizza::Model,
) -> Map<String, Value> {
    let mut map = serialize::columns(rp);
    map.insert("restaurant".to_string(), Value::Object(serialize::columns(restaurant)));
    map.insert("pizza".to_string(), Value::Object(serialize::columns(pizza)));
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_price_inside_bounds_is_accepted() {
        for price in PRICE_MIN..=PRICE_MAX {
            assert!(validate_price(price).is_ok(), "price {} should pass", price);
        }
    }

    #[test]
    fn prices_outside_bounds_are_rejected() {
        for price in [0, -1, -5, 31, 100, i32::MIN, i32::MAX] {
            let err = validate_price(price).unwrap_err();
            assert!(matches!(err, ModelError::Validation(_)), "price {} should fail", price);
        }
    }

    #[test]
    fn expanded_nests_both_parents_one_level() {
        let rp = Model { id: 7, price: 15, restaurant_id: 1, pizza_id: 2 };
        let r = restaurant::Model { id: 1, name: "Dough Co".into(), address: "1 Main St".into() };
        let p = pizza::Model { id: 2, name: "Margherita".into(), ingredients: "Dough, Tomato, Cheese".into() };

        let map = expanded(&rp, &r, &p);
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, ["id", "pizza", "pizza_id", "price", "restaurant", "restaurant_id"]);
        assert_eq!(map["price"], 15);
        assert_eq!(map["restaurant"]["name"], "Dough Co");
        assert_eq!(map["pizza"]["ingredients"], "Dough, Tomato, Cheese");
        // nested objects carry scalar fields only
        assert!(map["restaurant"].get("restaurant_pizzas").is_none());
        assert!(map["pizza"].get("restaurant_pizzas").is_none());
    }
}
