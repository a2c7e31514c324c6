use ::entity::{
    access_token, cart, cart_item, category, food, order, order_item, review, user,
    AccessToken, Cart, CartItem, Category, Food, Order, OrderItem, Review, User,
};
use rust_decimal::Decimal;
use sea_orm::*;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

/// A cart with its line items and the foods they point at, loaded as one
/// read model.
#[derive(Debug)]
pub struct CartContents {
    pub cart: cart::Model,
    pub items: Vec<(cart_item::Model, food::Model)>,
}

impl CartContents {
    /// Live total: quantity × current catalog price, summed over items.
    /// Distinct from the frozen prices recorded when an order is created.
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(|(item, food)| food.price * Decimal::from(item.quantity))
            .sum()
    }
}

pub struct Query;

impl Query {
    /// Resolves a bearer token to its user. `None` covers both an unknown
    /// token and a token whose user row is gone.
    pub async fn find_user_by_token(db: &DbConn, token: Uuid) -> ServiceResult<Option<user::Model>> {
        let found = AccessToken::find()
            .filter(access_token::Column::Token.eq(token))
            .find_also_related(User)
            .one(db)
            .await?;
        Ok(found.and_then(|(_, user)| user))
    }

    pub async fn find_food_by_id(db: &DbConn, id: i32) -> ServiceResult<Option<food::Model>> {
        Ok(Food::find_by_id(id).one(db).await?)
    }

    /// If ok, returns (food models, num pages). Newest first.
    pub async fn find_foods_in_page(
        db: &DbConn,
        page: u64,
        foods_per_page: u64,
    ) -> ServiceResult<(Vec<food::Model>, u64)> {
        let paginator = Food::find()
            .order_by_desc(food::Column::Id)
            .paginate(db, foods_per_page);
        let num_pages = paginator.num_pages().await?;

        let foods = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((foods, num_pages))
    }

    pub async fn find_special_foods(db: &DbConn) -> ServiceResult<Vec<food::Model>> {
        Ok(Food::find()
            .filter(food::Column::IsSpecial.eq(true))
            .order_by_desc(food::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn find_categories(db: &DbConn) -> ServiceResult<Vec<category::Model>> {
        Ok(Category::find()
            .order_by_asc(category::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn find_category_by_id(
        db: &DbConn,
        id: i32,
    ) -> ServiceResult<Option<category::Model>> {
        Ok(Category::find_by_id(id).one(db).await?)
    }

    pub async fn find_cart_by_id(db: &DbConn, id: Uuid) -> ServiceResult<Option<cart::Model>> {
        Ok(Cart::find_by_id(id).one(db).await?)
    }

    pub async fn find_cart_of_user(
        db: &DbConn,
        user_id: i32,
    ) -> ServiceResult<Option<cart::Model>> {
        Ok(Cart::find()
            .filter(cart::Column::UserId.eq(user_id))
            .one(db)
            .await?)
    }

    /// Cart items joined with their foods, for one cart.
    pub async fn find_cart_items(
        db: &DbConn,
        cart_id: Uuid,
    ) -> ServiceResult<Vec<(cart_item::Model, food::Model)>> {
        let rows = CartItem::find()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .order_by_asc(cart_item::Column::Id)
            .find_also_related(Food)
            .all(db)
            .await?;

        rows.into_iter()
            .map(|(item, food)| {
                // The food FK is not nullable; a missing row is data damage,
                // not a user-facing 404.
                let food = food.ok_or_else(|| {
                    DbErr::RecordNotFound(format!(
                        "food {} for cart item {}",
                        item.food_id, item.id
                    ))
                })?;
                Ok((item, food))
            })
            .collect::<Result<Vec<_>, DbErr>>()
            .map_err(ServiceError::from)
    }

    pub async fn find_cart_item(
        db: &DbConn,
        id: i32,
    ) -> ServiceResult<Option<cart_item::Model>> {
        Ok(CartItem::find_by_id(id).one(db).await?)
    }

    /// Loads a cart plus its contents, or `None` when the cart is gone.
    pub async fn load_cart(db: &DbConn, cart_id: Uuid) -> ServiceResult<Option<CartContents>> {
        let Some(cart) = Self::find_cart_by_id(db, cart_id).await? else {
            return Ok(None);
        };
        let items = Self::find_cart_items(db, cart_id).await?;
        Ok(Some(CartContents { cart, items }))
    }

    pub async fn find_order_by_id(db: &DbConn, id: i32) -> ServiceResult<Option<order::Model>> {
        Ok(Order::find_by_id(id).one(db).await?)
    }

    pub async fn find_order_with_items(
        db: &DbConn,
        id: i32,
    ) -> ServiceResult<Option<(order::Model, Vec<order_item::Model>)>> {
        let mut rows = Order::find_by_id(id)
            .find_with_related(OrderItem)
            .all(db)
            .await?;
        Ok(rows.pop())
    }

    /// Orders with their items, newest first. `user_filter` scopes the list
    /// to one user; admins pass `None` to see everything.
    pub async fn find_orders_with_items(
        db: &DbConn,
        user_filter: Option<i32>,
    ) -> ServiceResult<Vec<(order::Model, Vec<order_item::Model>)>> {
        let mut select = Order::find().order_by_desc(order::Column::Id);
        if let Some(user_id) = user_filter {
            select = select.filter(order::Column::UserId.eq(user_id));
        }
        Ok(select.find_with_related(OrderItem).all(db).await?)
    }

    /// True iff any of the user's orders contains the food.
    pub async fn has_ordered(db: &DbConn, user_id: i32, food_id: i32) -> ServiceResult<bool> {
        let count = OrderItem::find()
            .filter(order_item::Column::FoodId.eq(food_id))
            .join(JoinType::InnerJoin, order_item::Relation::Order.def())
            .filter(order::Column::UserId.eq(user_id))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn find_reviews_for_food(
        db: &DbConn,
        food_id: i32,
    ) -> ServiceResult<Vec<review::Model>> {
        Ok(Review::find()
            .filter(review::Column::FoodId.eq(food_id))
            .order_by_desc(review::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn find_review_by_id(db: &DbConn, id: i32) -> ServiceResult<Option<review::Model>> {
        Ok(Review::find_by_id(id).one(db).await?)
    }
}
