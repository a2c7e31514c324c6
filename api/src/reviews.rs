use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use entity::review;
use feastly_service::{
    Mutation as MutationCore, NewReview, Query as QueryCore, ReviewPatch, ServiceError,
};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::AppState;

/// Reviews are addressed through their food; an id under the wrong food is
/// a 404.
async fn scoped_review(state: &AppState, food_id: i32, review_id: i32) -> ApiResult<review::Model> {
    let review = QueryCore::find_review_by_id(&state.conn, review_id)
        .await?
        .filter(|review| review.food_id == food_id)
        .ok_or_else(|| ServiceError::NotFound("No review found with this id".to_owned()))?;
    Ok(review)
}

pub async fn list_reviews(
    state: State<AppState>,
    Path(food_id): Path<i32>,
) -> ApiResult<Json<Vec<review::Model>>> {
    Ok(Json(
        QueryCore::find_reviews_for_food(&state.conn, food_id).await?,
    ))
}

pub async fn create_review(
    state: State<AppState>,
    user: CurrentUser,
    Path(food_id): Path<i32>,
    Json(form): Json<NewReview>,
) -> ApiResult<(StatusCode, Json<review::Model>)> {
    let review = MutationCore::create_review(&state.conn, food_id, user.0.id, form).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn update_review(
    state: State<AppState>,
    user: CurrentUser,
    Path((food_id, review_id)): Path<(i32, i32)>,
    Json(form): Json<ReviewPatch>,
) -> ApiResult<Json<review::Model>> {
    scoped_review(&state, food_id, review_id).await?;
    Ok(Json(
        MutationCore::update_review(&state.conn, review_id, &user.0, form).await?,
    ))
}

pub async fn delete_review(
    state: State<AppState>,
    user: CurrentUser,
    Path((food_id, review_id)): Path<(i32, i32)>,
) -> ApiResult<StatusCode> {
    scoped_review(&state, food_id, review_id).await?;
    MutationCore::delete_review(&state.conn, review_id, &user.0).await?;
    Ok(StatusCode::NO_CONTENT)
}
