//! Reply shapes the storefront and dashboard consume. Carts render their
//! foods' live catalog prices; orders render the prices frozen at creation.

use entity::sea_orm::prelude::DateTimeUtc;
use entity::{cart_item, food, order, order_item, OrderStatus};
use feastly_service::CartContents;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct FoodBrief {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
}

/// Full catalog view of a food. `price_with_discount` is computed per reply
/// so the storefront never re-derives discounts itself.
#[derive(Serialize)]
pub struct FoodReply {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub price_with_discount: Decimal,
    pub stock: i32,
    pub category_id: i32,
    pub is_special: bool,
    pub discount_percent: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl From<food::Model> for FoodReply {
    fn from(food: food::Model) -> Self {
        let price_with_discount = food.price_with_discount();
        Self {
            id: food.id,
            name: food.name,
            description: food.description,
            price: food.price,
            price_with_discount,
            stock: food.stock,
            category_id: food.category_id,
            is_special: food.is_special,
            discount_percent: food.discount_percent,
            created_at: food.created_at,
            updated_at: food.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct CartItemReply {
    pub id: i32,
    pub food: FoodBrief,
    pub quantity: i32,
    pub total_price: Decimal,
}

impl CartItemReply {
    pub fn new(item: &cart_item::Model, food: &food::Model) -> Self {
        Self {
            id: item.id,
            food: FoodBrief {
                id: food.id,
                name: food.name.clone(),
                price: food.price,
            },
            quantity: item.quantity,
            total_price: food.price * Decimal::from(item.quantity),
        }
    }
}

#[derive(Serialize)]
pub struct CartReply {
    pub id: Uuid,
    pub user: i32,
    pub items: Vec<CartItemReply>,
    pub total_price: Decimal,
}

impl From<&CartContents> for CartReply {
    fn from(contents: &CartContents) -> Self {
        Self {
            id: contents.cart.id,
            user: contents.cart.user_id,
            items: contents
                .items
                .iter()
                .map(|(item, food)| CartItemReply::new(item, food))
                .collect(),
            total_price: contents.total_price(),
        }
    }
}

#[derive(Serialize)]
pub struct OrderItemReply {
    pub id: i32,
    pub food_id: i32,
    pub food_name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub total_price: Decimal,
}

impl From<order_item::Model> for OrderItemReply {
    fn from(item: order_item::Model) -> Self {
        let total_price = item.total_price();
        Self {
            id: item.id,
            food_id: item.food_id,
            food_name: item.food_name,
            price: item.price,
            quantity: item.quantity,
            total_price,
        }
    }
}

#[derive(Serialize)]
pub struct OrderReply {
    pub id: i32,
    pub user: i32,
    pub status: OrderStatus,
    pub total_price: Decimal,
    pub created_at: DateTimeUtc,
    pub items: Vec<OrderItemReply>,
}

impl OrderReply {
    pub fn new(order: order::Model, items: Vec<order_item::Model>) -> Self {
        Self {
            id: order.id,
            user: order.user_id,
            status: order.status,
            total_price: order.total_price,
            created_at: order.created_at,
            items: items.into_iter().map(OrderItemReply::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct FoodsPage {
    pub foods: Vec<FoodReply>,
    pub page: u64,
    pub num_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discounted_food() -> food::Model {
        food::Model {
            id: 1,
            name: "Kacchi Biryani".to_owned(),
            description: "House special".to_owned(),
            price: "8.00".parse().unwrap(),
            stock: 10,
            category_id: 1,
            is_special: true,
            discount_percent: 25,
            created_at: DateTimeUtc::default(),
            updated_at: DateTimeUtc::default(),
        }
    }

    #[test]
    fn food_reply_carries_the_discounted_price() {
        let reply = FoodReply::from(discounted_food());
        assert_eq!(reply.price, "8.00".parse::<Decimal>().unwrap());
        assert_eq!(
            reply.price_with_discount,
            "6.00".parse::<Decimal>().unwrap()
        );

        let value = serde_json::to_value(&reply).unwrap();
        assert!(value.get("price_with_discount").is_some());
    }

    #[test]
    fn undiscounted_food_replies_with_its_plain_price() {
        let mut food = discounted_food();
        food.discount_percent = 0;

        let reply = FoodReply::from(food);
        assert_eq!(reply.price_with_discount, reply.price);
    }
}
