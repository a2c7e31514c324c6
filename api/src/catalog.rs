use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use entity::category;
use feastly_service::{
    CategoryPatch, FoodPatch, Mutation as MutationCore, NewCategory, NewFood,
    Query as QueryCore, ServiceError,
};
use serde::Deserialize;

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::wire::{FoodReply, FoodsPage};
use crate::AppState;

const DEFAULT_FOODS_PER_PAGE: u64 = 10;

#[derive(Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

pub async fn list_foods(
    state: State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<FoodsPage>> {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(DEFAULT_FOODS_PER_PAGE).max(1);
    let (foods, num_pages) = QueryCore::find_foods_in_page(&state.conn, page, per_page).await?;
    Ok(Json(FoodsPage {
        foods: foods.into_iter().map(FoodReply::from).collect(),
        page,
        num_pages,
    }))
}

pub async fn get_food(
    state: State<AppState>,
    Path(food_id): Path<i32>,
) -> ApiResult<Json<FoodReply>> {
    let food = QueryCore::find_food_by_id(&state.conn, food_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("No food found with this id".to_owned()))?;
    Ok(Json(FoodReply::from(food)))
}

pub async fn list_specials(state: State<AppState>) -> ApiResult<Json<Vec<FoodReply>>> {
    let specials = QueryCore::find_special_foods(&state.conn).await?;
    Ok(Json(specials.into_iter().map(FoodReply::from).collect()))
}

pub async fn create_food(
    state: State<AppState>,
    _admin: AdminUser,
    Json(form): Json<NewFood>,
) -> ApiResult<(StatusCode, Json<FoodReply>)> {
    let food = MutationCore::create_food(&state.conn, form).await?;
    Ok((StatusCode::CREATED, Json(FoodReply::from(food))))
}

pub async fn update_food(
    state: State<AppState>,
    _admin: AdminUser,
    Path(food_id): Path<i32>,
    Json(form): Json<FoodPatch>,
) -> ApiResult<Json<FoodReply>> {
    let food = MutationCore::update_food(&state.conn, food_id, form).await?;
    Ok(Json(FoodReply::from(food)))
}

pub async fn delete_food(
    state: State<AppState>,
    _admin: AdminUser,
    Path(food_id): Path<i32>,
) -> ApiResult<StatusCode> {
    MutationCore::delete_food(&state.conn, food_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_categories(state: State<AppState>) -> ApiResult<Json<Vec<category::Model>>> {
    Ok(Json(QueryCore::find_categories(&state.conn).await?))
}

pub async fn get_category(
    state: State<AppState>,
    Path(category_id): Path<i32>,
) -> ApiResult<Json<category::Model>> {
    let found = QueryCore::find_category_by_id(&state.conn, category_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("No category found with this id".to_owned()))?;
    Ok(Json(found))
}

pub async fn create_category(
    state: State<AppState>,
    _admin: AdminUser,
    Json(form): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<category::Model>)> {
    let created = MutationCore::create_category(&state.conn, form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_category(
    state: State<AppState>,
    _admin: AdminUser,
    Path(category_id): Path<i32>,
    Json(form): Json<CategoryPatch>,
) -> ApiResult<Json<category::Model>> {
    Ok(Json(
        MutationCore::update_category(&state.conn, category_id, form).await?,
    ))
}

pub async fn delete_category(
    state: State<AppState>,
    _admin: AdminUser,
    Path(category_id): Path<i32>,
) -> ApiResult<StatusCode> {
    MutationCore::delete_category(&state.conn, category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
