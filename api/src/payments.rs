use axum::extract::{Form, State};
use axum::response::Redirect;
use axum::Json;
use feastly_service::PaymentService;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::AppState;

/// Body the storefront checkout sends. The keys are camelCase on the wire.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePayload {
    pub amount: Decimal,
    pub order_id: i32,
    pub num_items: i32,
}

/// The gateway posts a large form back; only `tran_id` matters here.
#[derive(Deserialize)]
pub struct CallbackPayload {
    #[serde(default)]
    pub tran_id: String,
}

pub async fn initiate_payment(
    state: State<AppState>,
    user: CurrentUser,
    Json(payload): Json<InitiatePayload>,
) -> ApiResult<Json<Value>> {
    let url = PaymentService::initiate_payment(
        &state.conn,
        state.gateway.as_ref(),
        &state.callback_urls,
        &user.0,
        payload.order_id,
        payload.amount,
        payload.num_items,
    )
    .await?;
    Ok(Json(json!({ "payment_url": url })))
}

/// Success webhook: reconcile, then send the customer back to their orders.
/// An unknown or stale transaction id surfaces as an error status instead of
/// a silent redirect.
pub async fn payment_success(
    state: State<AppState>,
    Form(payload): Form<CallbackPayload>,
) -> ApiResult<Redirect> {
    PaymentService::confirm_payment(&state.conn, &payload.tran_id).await?;
    Ok(Redirect::to(&state.orders_page()))
}

pub async fn payment_fail(state: State<AppState>, Form(payload): Form<CallbackPayload>) -> Redirect {
    tracing::info!(tran_id = %payload.tran_id, "payment failed at the gateway");
    Redirect::to(&state.orders_page())
}

pub async fn payment_cancel(
    state: State<AppState>,
    Form(payload): Form<CallbackPayload>,
) -> Redirect {
    tracing::info!(tran_id = %payload.tran_id, "payment cancelled by the customer");
    Redirect::to(&state.orders_page())
}
