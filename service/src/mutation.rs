use ::entity::{
    cart, cart_item, category, food, order_item, review, user, Cart, CartItem, Category, Food,
    OrderItem, Review,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::query::Query;

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFood {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: i32,
    #[serde(default)]
    pub is_special: bool,
    #[serde(default)]
    pub discount_percent: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub category_id: Option<i32>,
    pub is_special: Option<bool>,
    pub discount_percent: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub ratings: i32,
    pub comment: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPatch {
    pub ratings: Option<i32>,
    pub comment: Option<String>,
}

pub struct Mutation;

impl Mutation {
    /// Returns the user's cart, creating an empty one on first access. The
    /// boolean is true when a cart was created by this call.
    pub async fn get_or_create_cart(
        db: &DbConn,
        user_id: i32,
    ) -> ServiceResult<(cart::Model, bool)> {
        if let Some(cart) = Query::find_cart_of_user(db, user_id).await? {
            return Ok((cart, false));
        }

        let cart = cart::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;

        Ok((cart, true))
    }

    /// Adds a food to a cart. Re-adding a food already in the cart bumps
    /// the existing line's quantity instead of creating a second row.
    pub async fn add_cart_item(
        db: &DbConn,
        cart_id: Uuid,
        food_id: i32,
        quantity: i32,
    ) -> ServiceResult<cart_item::Model> {
        if quantity <= 0 {
            return Err(ServiceError::Validation(
                "Quantity must be a positive integer".to_owned(),
            ));
        }
        Query::find_cart_by_id(db, cart_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No cart found with this id".to_owned()))?;
        Query::find_food_by_id(db, food_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Food with id {food_id} does not exist"))
            })?;

        let existing = CartItem::find()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .filter(cart_item::Column::FoodId.eq(food_id))
            .one(db)
            .await?;

        match existing {
            Some(line) => {
                // The summed quantity must stay a representable positive
                // integer, same as the input check above.
                let bumped = line.quantity.checked_add(quantity).ok_or_else(|| {
                    ServiceError::Validation("Quantity must be a positive integer".to_owned())
                })?;
                let mut line: cart_item::ActiveModel = line.into();
                line.quantity = Set(bumped);
                Ok(line.update(db).await?)
            }
            None => Ok(cart_item::ActiveModel {
                cart_id: Set(cart_id),
                food_id: Set(food_id),
                quantity: Set(quantity),
                ..Default::default()
            }
            .insert(db)
            .await?),
        }
    }

    /// Overwrites a line's quantity; only positivity is enforced.
    pub async fn update_cart_item_quantity(
        db: &DbConn,
        cart_item_id: i32,
        quantity: i32,
    ) -> ServiceResult<cart_item::Model> {
        if quantity <= 0 {
            return Err(ServiceError::Validation(
                "Quantity must be a positive integer".to_owned(),
            ));
        }
        let line = Query::find_cart_item(db, cart_item_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No cart item found with this id".to_owned()))?;

        let mut line: cart_item::ActiveModel = line.into();
        line.quantity = Set(quantity);
        Ok(line.update(db).await?)
    }

    pub async fn remove_cart_item(db: &DbConn, cart_item_id: i32) -> ServiceResult<()> {
        let res = CartItem::delete_by_id(cart_item_id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::NotFound(
                "No cart item found with this id".to_owned(),
            ));
        }
        Ok(())
    }

    /// Hard-deletes a cart; its items go with it via the FK cascade.
    pub async fn remove_cart(db: &DbConn, cart_id: Uuid) -> ServiceResult<()> {
        let res = Cart::delete_by_id(cart_id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::NotFound("No cart found with this id".to_owned()));
        }
        Ok(())
    }

    pub async fn create_category(
        db: &DbConn,
        form: NewCategory,
    ) -> ServiceResult<category::Model> {
        Ok(category::ActiveModel {
            name: Set(form.name),
            description: Set(form.description),
            ..Default::default()
        }
        .insert(db)
        .await?)
    }

    pub async fn update_category(
        db: &DbConn,
        id: i32,
        form: CategoryPatch,
    ) -> ServiceResult<category::Model> {
        let found = Query::find_category_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No category found with this id".to_owned()))?;

        let mut found: category::ActiveModel = found.into();
        if let Some(name) = form.name {
            found.name = Set(name);
        }
        if let Some(description) = form.description {
            found.description = Set(Some(description));
        }
        Ok(found.update(db).await?)
    }

    pub async fn delete_category(db: &DbConn, id: i32) -> ServiceResult<()> {
        let res = Category::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::NotFound(
                "No category found with this id".to_owned(),
            ));
        }
        Ok(())
    }

    pub async fn create_food(db: &DbConn, form: NewFood) -> ServiceResult<food::Model> {
        Self::check_food_fields(Some(form.price), Some(form.stock), Some(form.discount_percent))?;
        Query::find_category_by_id(db, form.category_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No category found with this id".to_owned()))?;

        let now = Utc::now();
        Ok(food::ActiveModel {
            name: Set(form.name),
            description: Set(form.description),
            price: Set(form.price),
            stock: Set(form.stock),
            category_id: Set(form.category_id),
            is_special: Set(form.is_special),
            discount_percent: Set(form.discount_percent),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?)
    }

    pub async fn update_food(db: &DbConn, id: i32, form: FoodPatch) -> ServiceResult<food::Model> {
        Self::check_food_fields(form.price, form.stock, form.discount_percent)?;
        let found = Query::find_food_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No food found with this id".to_owned()))?;
        if let Some(category_id) = form.category_id {
            Query::find_category_by_id(db, category_id)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound("No category found with this id".to_owned())
                })?;
        }

        let mut found: food::ActiveModel = found.into();
        if let Some(name) = form.name {
            found.name = Set(name);
        }
        if let Some(description) = form.description {
            found.description = Set(description);
        }
        if let Some(price) = form.price {
            found.price = Set(price);
        }
        if let Some(stock) = form.stock {
            found.stock = Set(stock);
        }
        if let Some(category_id) = form.category_id {
            found.category_id = Set(category_id);
        }
        if let Some(is_special) = form.is_special {
            found.is_special = Set(is_special);
        }
        if let Some(discount_percent) = form.discount_percent {
            found.discount_percent = Set(discount_percent);
        }
        found.updated_at = Set(Utc::now());
        Ok(found.update(db).await?)
    }

    /// Foods referenced by order lines stay deletable only once those orders
    /// are gone; historical snapshots keep their FK to the catalog row.
    pub async fn delete_food(db: &DbConn, id: i32) -> ServiceResult<()> {
        let referenced = OrderItem::find()
            .filter(order_item::Column::FoodId.eq(id))
            .count(db)
            .await?;
        if referenced > 0 {
            return Err(ServiceError::Validation(
                "Food is referenced by existing orders and cannot be deleted".to_owned(),
            ));
        }

        let res = Food::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::NotFound("No food found with this id".to_owned()));
        }
        Ok(())
    }

    pub async fn create_review(
        db: &DbConn,
        food_id: i32,
        user_id: i32,
        form: NewReview,
    ) -> ServiceResult<review::Model> {
        Self::check_ratings(form.ratings)?;
        Query::find_food_by_id(db, food_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Food with id {food_id} does not exist"))
            })?;

        let already = Review::find()
            .filter(review::Column::FoodId.eq(food_id))
            .filter(review::Column::UserId.eq(user_id))
            .count(db)
            .await?;
        if already > 0 {
            return Err(ServiceError::Validation(
                "You have already reviewed this food".to_owned(),
            ));
        }

        let now = Utc::now();
        Ok(review::ActiveModel {
            food_id: Set(food_id),
            user_id: Set(user_id),
            ratings: Set(form.ratings),
            comment: Set(form.comment),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?)
    }

    /// Reviews are writable by their author only.
    pub async fn update_review(
        db: &DbConn,
        review_id: i32,
        actor: &user::Model,
        form: ReviewPatch,
    ) -> ServiceResult<review::Model> {
        if let Some(ratings) = form.ratings {
            Self::check_ratings(ratings)?;
        }
        let found = Query::find_review_by_id(db, review_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No review found with this id".to_owned()))?;
        if found.user_id != actor.id {
            return Err(ServiceError::PermissionDenied(
                "You do not have permission to modify this review".to_owned(),
            ));
        }

        let mut found: review::ActiveModel = found.into();
        if let Some(ratings) = form.ratings {
            found.ratings = Set(ratings);
        }
        if let Some(comment) = form.comment {
            found.comment = Set(comment);
        }
        found.updated_at = Set(Utc::now());
        Ok(found.update(db).await?)
    }

    pub async fn delete_review(
        db: &DbConn,
        review_id: i32,
        actor: &user::Model,
    ) -> ServiceResult<()> {
        let found = Query::find_review_by_id(db, review_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No review found with this id".to_owned()))?;
        if found.user_id != actor.id {
            return Err(ServiceError::PermissionDenied(
                "You do not have permission to modify this review".to_owned(),
            ));
        }

        found.delete(db).await?;
        Ok(())
    }

    fn check_food_fields(
        price: Option<Decimal>,
        stock: Option<i32>,
        discount_percent: Option<i32>,
    ) -> ServiceResult<()> {
        if price.is_some_and(|p| p.is_sign_negative()) {
            return Err(ServiceError::Validation(
                "Price must not be negative".to_owned(),
            ));
        }
        if stock.is_some_and(|s| s < 0) {
            return Err(ServiceError::Validation(
                "Stock must not be negative".to_owned(),
            ));
        }
        if discount_percent.is_some_and(|d| !(0..=100).contains(&d)) {
            return Err(ServiceError::Validation(
                "Discount percent must be between 0 and 100".to_owned(),
            ));
        }
        Ok(())
    }

    fn check_ratings(ratings: i32) -> ServiceResult<()> {
        if !(1..=5).contains(&ratings) {
            return Err(ServiceError::Validation(
                "Ratings must be between 1 and 5".to_owned(),
            ));
        }
        Ok(())
    }
}
