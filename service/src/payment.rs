use ::entity::{order, payment_session, user, Order, OrderStatus, PaymentSession};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};

const CURRENCY: &str = "BDT";
const PRODUCT_NAME: &str = "E-commerce Foods";
const PRODUCT_CATEGORY: &str = "General";
const PRODUCT_PROFILE: &str = "general";

const SANDBOX_ENDPOINT: &str = "https://sandbox.sslcommerz.com/gwprocess/v4/api.php";
const LIVE_ENDPOINT: &str = "https://securepay.sslcommerz.com/gwprocess/v4/api.php";

/// Everything a hosted-session request carries to the gateway.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub tran_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub num_items: i32,
    pub product_name: String,
    pub product_category: String,
    pub product_profile: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub success_url: String,
    pub fail_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    /// Hosted payment page the customer is redirected to.
    pub redirect_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway unreachable: {0}")]
    Transport(String),
    #[error("gateway declined: {0}")]
    Declined(String),
}

/// Seam to the hosted-payment provider. Production uses [`SslCommerzGateway`];
/// tests substitute a canned implementation.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_session(&self, request: &CheckoutRequest)
        -> Result<CheckoutSession, GatewayError>;
}

/// SSLCommerz v4 session API client.
pub struct SslCommerzGateway {
    http: reqwest::Client,
    endpoint: String,
    store_id: String,
    store_passwd: String,
}

impl SslCommerzGateway {
    pub fn new(store_id: impl Into<String>, store_passwd: impl Into<String>, sandbox: bool) -> Self {
        let endpoint = if sandbox { SANDBOX_ENDPOINT } else { LIVE_ENDPOINT };
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.to_owned(),
            store_id: store_id.into(),
            store_passwd: store_passwd.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionReply {
    #[serde(default)]
    status: String,
    #[serde(default)]
    failedreason: String,
    #[serde(default, rename = "GatewayPageURL")]
    gateway_page_url: String,
}

#[async_trait]
impl PaymentGateway for SslCommerzGateway {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        let form = [
            ("store_id", self.store_id.clone()),
            ("store_passwd", self.store_passwd.clone()),
            ("total_amount", request.amount.to_string()),
            ("currency", request.currency.clone()),
            ("tran_id", request.tran_id.clone()),
            ("success_url", request.success_url.clone()),
            ("fail_url", request.fail_url.clone()),
            ("cancel_url", request.cancel_url.clone()),
            ("emi_option", "0".to_owned()),
            ("cus_name", request.customer_name.clone()),
            ("cus_email", request.customer_email.clone()),
            ("cus_phone", request.customer_phone.clone()),
            ("cus_add1", request.customer_address.clone()),
            ("cus_city", "Dhaka".to_owned()),
            ("cus_country", "Bangladesh".to_owned()),
            ("shipping_method", "NO".to_owned()),
            ("multi_card_name", String::new()),
            ("num_of_item", request.num_items.to_string()),
            ("product_name", request.product_name.clone()),
            ("product_category", request.product_category.clone()),
            ("product_profile", request.product_profile.clone()),
        ];

        let reply = self
            .http
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?
            .json::<SessionReply>()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if reply.status == "SUCCESS" {
            Ok(CheckoutSession {
                redirect_url: reply.gateway_page_url,
            })
        } else {
            let reason = if reply.failedreason.is_empty() {
                reply.status
            } else {
                reply.failedreason
            };
            Err(GatewayError::Declined(reason))
        }
    }
}

/// Where the gateway sends the customer (and its webhooks) afterwards.
/// Assembled by the HTTP layer from its own mounted routes.
#[derive(Debug, Clone)]
pub struct CallbackUrls {
    pub success: String,
    pub fail: String,
    pub cancel: String,
}

pub struct PaymentService;

impl PaymentService {
    /// Transaction ids are derived from the order id, one session per order.
    pub fn tran_id_for_order(order_id: i32) -> String {
        format!("txn_{order_id}")
    }

    /// Opens a hosted-payment session for an order and returns the redirect
    /// URL. The tran_id → order mapping is persisted before the gateway is
    /// called, so a webhook can always resolve it by lookup.
    pub async fn initiate_payment(
        db: &DbConn,
        gateway: &dyn PaymentGateway,
        urls: &CallbackUrls,
        actor: &user::Model,
        order_id: i32,
        amount: Decimal,
        num_items: i32,
    ) -> ServiceResult<String> {
        let found = Order::find_by_id(order_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No order found with this id".to_owned()))?;
        if found.user_id != actor.id && !actor.is_staff {
            return Err(ServiceError::PermissionDenied(
                "You do not have permission to pay for this order".to_owned(),
            ));
        }

        let tran_id = Self::tran_id_for_order(order_id);
        let now = Utc::now();
        let existing = PaymentSession::find()
            .filter(payment_session::Column::TranId.eq(tran_id.as_str()))
            .one(db)
            .await?;
        match existing {
            Some(session) => {
                let mut session: payment_session::ActiveModel = session.into();
                session.amount = Set(amount);
                session.updated_at = Set(now);
                session.update(db).await?;
            }
            None => {
                payment_session::ActiveModel {
                    order_id: Set(order_id),
                    tran_id: Set(tran_id.clone()),
                    amount: Set(amount),
                    currency: Set(CURRENCY.to_owned()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            }
        }

        let request = CheckoutRequest {
            tran_id: tran_id.clone(),
            amount,
            currency: CURRENCY.to_owned(),
            num_items,
            product_name: PRODUCT_NAME.to_owned(),
            product_category: PRODUCT_CATEGORY.to_owned(),
            product_profile: PRODUCT_PROFILE.to_owned(),
            customer_name: actor.full_name(),
            customer_email: actor.email.clone(),
            customer_phone: actor.phone_number.clone(),
            customer_address: actor.address.clone(),
            success_url: urls.success.clone(),
            fail_url: urls.fail.clone(),
            cancel_url: urls.cancel.clone(),
        };

        match gateway.create_session(&request).await {
            Ok(session) => {
                tracing::info!(order_id, %tran_id, "payment session created");
                Ok(session.redirect_url)
            }
            Err(err) => {
                tracing::warn!(order_id, %tran_id, error = %err, "payment session refused");
                Err(ServiceError::PaymentInitiation(err.to_string()))
            }
        }
    }

    /// Success-webhook reconciliation. The transaction id is adversarial
    /// input: it is looked up, never parsed. Unknown ids fail `NotFound`
    /// with nothing mutated. The transition is a single conditional update,
    /// `Pending → Ready To Ship`; a replay on an already-shipped-ready order
    /// is a no-op success, and anything else (notably `Cancelled`) is
    /// refused rather than resurrected.
    pub async fn confirm_payment(db: &DbConn, tran_id: &str) -> ServiceResult<order::Model> {
        let session = PaymentSession::find()
            .filter(payment_session::Column::TranId.eq(tran_id))
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No payment session for transaction {tran_id}"))
            })?;

        let res = Order::update_many()
            .col_expr(order::Column::Status, Expr::value(OrderStatus::ReadyToShip))
            .filter(order::Column::Id.eq(session.order_id))
            .filter(order::Column::Status.eq(OrderStatus::Pending))
            .exec(db)
            .await?;

        let found = Order::find_by_id(session.order_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No order found with this id".to_owned()))?;

        if res.rows_affected == 1 {
            tracing::info!(order_id = found.id, %tran_id, "payment confirmed");
            return Ok(found);
        }
        match found.status {
            // Replayed webhook; the transition already happened.
            OrderStatus::ReadyToShip => Ok(found),
            other => {
                tracing::warn!(order_id = found.id, %tran_id, status = ?other, "stale payment callback refused");
                Err(ServiceError::Validation(format!(
                    "Order {} is {} and cannot accept a payment confirmation",
                    found.id,
                    other.to_value()
                )))
            }
        }
    }
}
