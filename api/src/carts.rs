use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use entity::{cart, food, user};
use feastly_service::sea_orm::DatabaseConnection;
use feastly_service::{
    CartContents, Mutation as MutationCore, Query as QueryCore, ServiceError,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::wire::{CartItemReply, CartReply};
use crate::AppState;

#[derive(Deserialize)]
pub struct AddItemPayload {
    pub food_id: i32,
    pub quantity: i32,
}

#[derive(Deserialize)]
pub struct QuantityPayload {
    pub quantity: i32,
}

/// Carts are scoped to their owner, staff included; someone else's cart id
/// answers 404, not 403, so ids leak nothing.
async fn owned_cart(
    conn: &DatabaseConnection,
    actor: &user::Model,
    cart_id: Uuid,
) -> ApiResult<cart::Model> {
    let cart = QueryCore::find_cart_by_id(conn, cart_id)
        .await?
        .filter(|cart| cart.user_id == actor.id)
        .ok_or_else(|| ServiceError::NotFound("No cart found with this id".to_owned()))?;
    Ok(cart)
}

async fn food_for_item(conn: &DatabaseConnection, food_id: i32) -> ApiResult<food::Model> {
    let food = QueryCore::find_food_by_id(conn, food_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Food with id {food_id} does not exist")))?;
    Ok(food)
}

/// `POST /carts` returns the caller's cart, creating it on first use. 201
/// only when this call created it.
pub async fn create_cart(
    state: State<AppState>,
    user: CurrentUser,
) -> ApiResult<(StatusCode, Json<CartReply>)> {
    let (cart, created) = MutationCore::get_or_create_cart(&state.conn, user.0.id).await?;
    let items = QueryCore::find_cart_items(&state.conn, cart.id).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(CartReply::from(&CartContents { cart, items }))))
}

pub async fn get_cart(
    state: State<AppState>,
    user: CurrentUser,
    Path(cart_id): Path<Uuid>,
) -> ApiResult<Json<CartReply>> {
    let cart = owned_cart(&state.conn, &user.0, cart_id).await?;
    let items = QueryCore::find_cart_items(&state.conn, cart.id).await?;
    Ok(Json(CartReply::from(&CartContents { cart, items })))
}

pub async fn delete_cart(
    state: State<AppState>,
    user: CurrentUser,
    Path(cart_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let cart = owned_cart(&state.conn, &user.0, cart_id).await?;
    MutationCore::remove_cart(&state.conn, cart.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_cart_items(
    state: State<AppState>,
    user: CurrentUser,
    Path(cart_id): Path<Uuid>,
) -> ApiResult<Json<Vec<CartItemReply>>> {
    let cart = owned_cart(&state.conn, &user.0, cart_id).await?;
    let items = QueryCore::find_cart_items(&state.conn, cart.id).await?;
    Ok(Json(
        items
            .iter()
            .map(|(item, food)| CartItemReply::new(item, food))
            .collect(),
    ))
}

pub async fn add_cart_item(
    state: State<AppState>,
    user: CurrentUser,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<AddItemPayload>,
) -> ApiResult<(StatusCode, Json<CartItemReply>)> {
    let cart = owned_cart(&state.conn, &user.0, cart_id).await?;
    let item =
        MutationCore::add_cart_item(&state.conn, cart.id, payload.food_id, payload.quantity)
            .await?;
    let food = food_for_item(&state.conn, item.food_id).await?;
    Ok((StatusCode::CREATED, Json(CartItemReply::new(&item, &food))))
}

pub async fn get_cart_item(
    state: State<AppState>,
    user: CurrentUser,
    Path((cart_id, item_id)): Path<(Uuid, i32)>,
) -> ApiResult<Json<CartItemReply>> {
    let cart = owned_cart(&state.conn, &user.0, cart_id).await?;
    let item = QueryCore::find_cart_item(&state.conn, item_id)
        .await?
        .filter(|item| item.cart_id == cart.id)
        .ok_or_else(|| ServiceError::NotFound("No cart item found with this id".to_owned()))?;
    let food = food_for_item(&state.conn, item.food_id).await?;
    Ok(Json(CartItemReply::new(&item, &food)))
}

pub async fn update_cart_item(
    state: State<AppState>,
    user: CurrentUser,
    Path((cart_id, item_id)): Path<(Uuid, i32)>,
    Json(payload): Json<QuantityPayload>,
) -> ApiResult<Json<CartItemReply>> {
    let cart = owned_cart(&state.conn, &user.0, cart_id).await?;
    QueryCore::find_cart_item(&state.conn, item_id)
        .await?
        .filter(|item| item.cart_id == cart.id)
        .ok_or_else(|| ServiceError::NotFound("No cart item found with this id".to_owned()))?;

    let item =
        MutationCore::update_cart_item_quantity(&state.conn, item_id, payload.quantity).await?;
    let food = food_for_item(&state.conn, item.food_id).await?;
    Ok(Json(CartItemReply::new(&item, &food)))
}

pub async fn remove_cart_item(
    state: State<AppState>,
    user: CurrentUser,
    Path((cart_id, item_id)): Path<(Uuid, i32)>,
) -> ApiResult<StatusCode> {
    let cart = owned_cart(&state.conn, &user.0, cart_id).await?;
    QueryCore::find_cart_item(&state.conn, item_id)
        .await?
        .filter(|item| item.cart_id == cart.id)
        .ok_or_else(|| ServiceError::NotFound("No cart item found with this id".to_owned()))?;

    MutationCore::remove_cart_item(&state.conn, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
