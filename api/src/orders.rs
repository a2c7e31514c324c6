use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use entity::sea_orm::ActiveEnum;
use entity::OrderStatus;
use feastly_service::{OrderService, Query as QueryCore, ServiceError};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{AdminUser, CurrentUser};
use crate::error::ApiResult;
use crate::wire::OrderReply;
use crate::AppState;

#[derive(Deserialize)]
pub struct CreateOrderPayload {
    pub cart_id: Uuid,
}

#[derive(Deserialize)]
pub struct StatusPayload {
    pub status: OrderStatus,
}

/// `GET /orders` lists the caller's order history; staff see every order.
pub async fn list_orders(
    state: State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<OrderReply>>> {
    let user_filter = if user.0.is_staff { None } else { Some(user.0.id) };
    let orders = QueryCore::find_orders_with_items(&state.conn, user_filter).await?;
    Ok(Json(
        orders
            .into_iter()
            .map(|(order, items)| OrderReply::new(order, items))
            .collect(),
    ))
}

pub async fn create_order(
    state: State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderPayload>,
) -> ApiResult<(StatusCode, Json<OrderReply>)> {
    let (order, items) = OrderService::create_order(&state.conn, user.0.id, payload.cart_id).await?;
    Ok((StatusCode::CREATED, Json(OrderReply::new(order, items))))
}

pub async fn get_order(
    state: State<AppState>,
    user: CurrentUser,
    Path(order_id): Path<i32>,
) -> ApiResult<Json<OrderReply>> {
    let (order, items) = QueryCore::find_order_with_items(&state.conn, order_id)
        .await?
        .filter(|(order, _)| order.user_id == user.0.id || user.0.is_staff)
        .ok_or_else(|| ServiceError::NotFound("No order found with this id".to_owned()))?;
    Ok(Json(OrderReply::new(order, items)))
}

pub async fn cancel_order(
    state: State<AppState>,
    user: CurrentUser,
    Path(order_id): Path<i32>,
) -> ApiResult<Json<Value>> {
    OrderService::cancel_order(&state.conn, order_id, &user.0).await?;
    Ok(Json(json!({ "status": "Order canceled" })))
}

pub async fn update_status(
    state: State<AppState>,
    _admin: AdminUser,
    Path(order_id): Path<i32>,
    Json(payload): Json<StatusPayload>,
) -> ApiResult<Json<Value>> {
    let updated = OrderService::update_status(&state.conn, order_id, payload.status).await?;
    Ok(Json(json!({
        "status": format!("Order status updated to {}", updated.status.to_value())
    })))
}

pub async fn delete_order(
    state: State<AppState>,
    _admin: AdminUser,
    Path(order_id): Path<i32>,
) -> ApiResult<StatusCode> {
    OrderService::delete_order(&state.conn, order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /orders/has-ordered/{food_id}` reports whether the caller ever
/// bought the food. The storefront uses it to gate the review form.
pub async fn has_ordered(
    state: State<AppState>,
    user: CurrentUser,
    Path(food_id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let has_ordered = QueryCore::has_ordered(&state.conn, user.0.id, food_id).await?;
    Ok(Json(json!({ "hasOrdered": has_ordered })))
}
