use ::entity::{cart_item, order, order_item, user, Cart, CartItem, Food, Order, OrderStatus};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::*;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

pub struct OrderService;

impl OrderService {
    /// Converts a cart into an order in one transaction: snapshot every
    /// line's food name and price, insert the order and its items, then
    /// delete the cart.
    ///
    /// The cart delete doubles as the serialization point for concurrent
    /// calls on the same cart: whichever transaction deletes the row first
    /// wins, and the loser sees `rows_affected == 0` and rolls back with
    /// `NotFound`. Partial orders are never observable.
    pub async fn create_order(
        db: &DbConn,
        user_id: i32,
        cart_id: Uuid,
    ) -> ServiceResult<(order::Model, Vec<order_item::Model>)> {
        let txn = db.begin().await?;

        // Callers validate too, but the cart may have been emptied or
        // consumed between their check and this transaction.
        Cart::find_by_id(cart_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No cart found with this id".to_owned()))?;

        let lines = CartItem::find()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .find_also_related(Food)
            .all(&txn)
            .await?;
        if lines.is_empty() {
            return Err(ServiceError::Validation("Cart is empty".to_owned()));
        }

        let mut total = Decimal::ZERO;
        let mut snapshots = Vec::with_capacity(lines.len());
        for (line, food) in lines {
            let food = food.ok_or_else(|| {
                DbErr::RecordNotFound(format!("food {} for cart item {}", line.food_id, line.id))
            })?;
            total += food.price * Decimal::from(line.quantity);
            snapshots.push((line, food));
        }

        let created = order::ActiveModel {
            user_id: Set(user_id),
            status: Set(OrderStatus::Pending),
            total_price: Set(total),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut items = Vec::with_capacity(snapshots.len());
        for (line, food) in snapshots {
            let item = order_item::ActiveModel {
                order_id: Set(created.id),
                food_id: Set(food.id),
                food_name: Set(food.name),
                price: Set(food.price),
                quantity: Set(line.quantity),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            items.push(item);
        }

        let deleted = Cart::delete_by_id(cart_id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            // Another transaction consumed the cart first. Dropping the
            // transaction rolls back the order and items inserted above.
            return Err(ServiceError::NotFound("No cart found with this id".to_owned()));
        }

        txn.commit().await?;

        tracing::info!(
            order_id = created.id,
            user_id,
            total_price = %created.total_price,
            items = items.len(),
            "order created"
        );
        Ok((created, items))
    }

    /// Owner or admin only; refused once the order is in a terminal state.
    pub async fn cancel_order(
        db: &DbConn,
        order_id: i32,
        actor: &user::Model,
    ) -> ServiceResult<order::Model> {
        let found = Order::find_by_id(order_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No order found with this id".to_owned()))?;

        if found.user_id != actor.id && !actor.is_staff {
            return Err(ServiceError::PermissionDenied(
                "You do not have permission to cancel this order".to_owned(),
            ));
        }
        if found.status.is_terminal() {
            return Err(ServiceError::Validation(
                "Order is already cancelled".to_owned(),
            ));
        }

        let mut active: order::ActiveModel = found.into();
        active.status = Set(OrderStatus::Cancelled);
        let cancelled = active.update(db).await?;

        tracing::info!(order_id, actor = actor.id, "order cancelled");
        Ok(cancelled)
    }

    /// Operator escape hatch: overwrites the status with no transition-table
    /// check. Admin-only, enforced at the HTTP layer.
    pub async fn update_status(
        db: &DbConn,
        order_id: i32,
        new_status: OrderStatus,
    ) -> ServiceResult<order::Model> {
        let found = Order::find_by_id(order_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No order found with this id".to_owned()))?;

        let mut active: order::ActiveModel = found.into();
        active.status = Set(new_status);
        let updated = active.update(db).await?;

        tracing::info!(order_id, status = ?updated.status, "order status overwritten");
        Ok(updated)
    }

    /// Admin-only hard delete; items cascade.
    pub async fn delete_order(db: &DbConn, order_id: i32) -> ServiceResult<()> {
        let res = Order::delete_by_id(order_id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::NotFound("No order found with this id".to_owned()));
        }
        Ok(())
    }
}
