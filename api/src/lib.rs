mod auth;
mod carts;
mod catalog;
mod error;
mod orders;
mod payments;
mod reviews;
mod wire;

use std::env;
use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;
use feastly_service::sea_orm::{Database, DatabaseConnection};
use feastly_service::{CallbackUrls, PaymentGateway, SslCommerzGateway};
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub(crate) conn: DatabaseConnection,
    pub(crate) gateway: Arc<dyn PaymentGateway>,
    pub(crate) callback_urls: CallbackUrls,
    pub(crate) frontend_url: String,
}

impl AppState {
    /// Where customers land after the gateway hands them back.
    pub(crate) fn orders_page(&self) -> String {
        format!("{}/dashboard/orders/", self.frontend_url)
    }
}

#[tokio::main]
async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");
    let server_url = format!("{host}:{port}");

    let backend_url = env::var("BACKEND_URL").expect("BACKEND_URL is not set in .env file");
    let frontend_url = env::var("FRONTEND_URL").expect("FRONTEND_URL is not set in .env file");
    let store_id =
        env::var("SSLCOMMERZ_STORE_ID").expect("SSLCOMMERZ_STORE_ID is not set in .env file");
    let store_passwd =
        env::var("SSLCOMMERZ_STORE_PASS").expect("SSLCOMMERZ_STORE_PASS is not set in .env file");
    let sandbox = env::var("SSLCOMMERZ_SANDBOX").map(|v| v != "false").unwrap_or(true);

    let conn = Database::connect(&db_url)
        .await
        .expect("Database connection failed");
    Migrator::up(&conn, None).await?;

    // The gateway webhooks post to these; they must match the mounted
    // routes below, trailing slash included.
    let callback_urls = CallbackUrls {
        success: format!("{backend_url}/api/v1/payment/success/"),
        fail: format!("{backend_url}/api/v1/payment/fail/"),
        cancel: format!("{backend_url}/api/v1/payment/cancel/"),
    };

    let state = AppState {
        conn,
        gateway: Arc::new(SslCommerzGateway::new(store_id, store_passwd, sandbox)),
        callback_urls,
        frontend_url,
    };

    let app = Router::new().nest("/api/v1", routes()).with_state(state);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    tracing::info!("listening on {server_url}");
    axum::serve(listener, app).await?;

    Ok(())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/carts", post(carts::create_cart))
        .route(
            "/carts/{cart_id}",
            get(carts::get_cart).delete(carts::delete_cart),
        )
        .route(
            "/carts/{cart_id}/items",
            get(carts::list_cart_items).post(carts::add_cart_item),
        )
        .route(
            "/carts/{cart_id}/items/{item_id}",
            get(carts::get_cart_item)
                .patch(carts::update_cart_item)
                .delete(carts::remove_cart_item),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route("/orders/has-ordered/{food_id}", get(orders::has_ordered))
        .route(
            "/orders/{order_id}",
            get(orders::get_order).delete(orders::delete_order),
        )
        .route("/orders/{order_id}/cancel", post(orders::cancel_order))
        .route(
            "/orders/{order_id}/update_status",
            patch(orders::update_status),
        )
        .route("/payment/initiate", post(payments::initiate_payment))
        .route("/payment/success/", post(payments::payment_success))
        .route("/payment/fail/", post(payments::payment_fail))
        .route("/payment/cancel/", post(payments::payment_cancel))
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/categories/{category_id}",
            get(catalog::get_category)
                .patch(catalog::update_category)
                .delete(catalog::delete_category),
        )
        .route("/foods", get(catalog::list_foods).post(catalog::create_food))
        .route("/foods/specials", get(catalog::list_specials))
        .route(
            "/foods/{food_id}",
            get(catalog::get_food)
                .patch(catalog::update_food)
                .delete(catalog::delete_food),
        )
        .route(
            "/foods/{food_id}/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/foods/{food_id}/reviews/{review_id}",
            patch(reviews::update_review).delete(reviews::delete_review),
        )
}

pub fn main() {
    let result = start();

    if let Some(err) = result.err() {
        println!("Error: {err}");
    }
}
