mod common;

use common::{seed_category, seed_food, seed_user, setup_db};
use feastly_service::{FoodPatch, Mutation, Query, ServiceError};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::test]
async fn cart_is_created_once_per_user() {
    let db = &setup_db().await;
    let user = seed_user(db, "cart@feastly.dev", false).await;

    let (cart, created) = Mutation::get_or_create_cart(db, user.id).await.unwrap();
    assert!(created);
    assert_eq!(cart.user_id, user.id);

    let (again, created) = Mutation::get_or_create_cart(db, user.id).await.unwrap();
    assert!(!created);
    assert_eq!(again.id, cart.id);
}

#[tokio::test]
async fn adding_same_food_twice_sums_quantity() {
    let db = &setup_db().await;
    let user = seed_user(db, "sum@feastly.dev", false).await;
    let category = seed_category(db, "Mains").await;
    let food = seed_food(db, category.id, "Biryani", "220.00").await;
    let (cart, _) = Mutation::get_or_create_cart(db, user.id).await.unwrap();

    let first = Mutation::add_cart_item(db, cart.id, food.id, 2).await.unwrap();
    let second = Mutation::add_cart_item(db, cart.id, food.id, 3).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.quantity, 5);

    let items = Query::find_cart_items(db, cart.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].0.quantity, 5);
}

#[tokio::test]
async fn add_cart_item_validates_inputs() {
    let db = &setup_db().await;
    let user = seed_user(db, "validate@feastly.dev", false).await;
    let category = seed_category(db, "Mains").await;
    let food = seed_food(db, category.id, "Tehari", "180.00").await;
    let (cart, _) = Mutation::get_or_create_cart(db, user.id).await.unwrap();

    let err = Mutation::add_cart_item(db, cart.id, food.id, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = Mutation::add_cart_item(db, cart.id, 9999, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = Mutation::add_cart_item(db, Uuid::new_v4(), food.id, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    assert!(Query::find_cart_items(db, cart.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn bumping_quantity_past_i32_max_is_rejected() {
    let db = &setup_db().await;
    let user = seed_user(db, "hoarder@feastly.dev", false).await;
    let category = seed_category(db, "Mains").await;
    let food = seed_food(db, category.id, "Kacchi", "300.00").await;
    let (cart, _) = Mutation::get_or_create_cart(db, user.id).await.unwrap();

    let line = Mutation::add_cart_item(db, cart.id, food.id, i32::MAX)
        .await
        .unwrap();

    // Re-adding must not wrap the summed quantity negative.
    let err = Mutation::add_cart_item(db, cart.id, food.id, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let line = Query::find_cart_item(db, line.id).await.unwrap().unwrap();
    assert_eq!(line.quantity, i32::MAX);
}

#[tokio::test]
async fn quantity_update_overwrites_and_enforces_positivity() {
    let db = &setup_db().await;
    let user = seed_user(db, "patch@feastly.dev", false).await;
    let category = seed_category(db, "Mains").await;
    let food = seed_food(db, category.id, "Grill", "260.00").await;
    let (cart, _) = Mutation::get_or_create_cart(db, user.id).await.unwrap();
    let line = Mutation::add_cart_item(db, cart.id, food.id, 2).await.unwrap();

    let line = Mutation::update_cart_item_quantity(db, line.id, 7)
        .await
        .unwrap();
    assert_eq!(line.quantity, 7);

    let err = Mutation::update_cart_item_quantity(db, line.id, -1)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = Mutation::update_cart_item_quantity(db, 9999, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn removing_cart_cascades_to_items() {
    let db = &setup_db().await;
    let user = seed_user(db, "remove@feastly.dev", false).await;
    let category = seed_category(db, "Mains").await;
    let food = seed_food(db, category.id, "Lassi", "90.00").await;
    let (cart, _) = Mutation::get_or_create_cart(db, user.id).await.unwrap();
    let line = Mutation::add_cart_item(db, cart.id, food.id, 1).await.unwrap();

    Mutation::remove_cart(db, cart.id).await.unwrap();

    assert!(Query::load_cart(db, cart.id).await.unwrap().is_none());
    assert!(Query::find_cart_item(db, line.id).await.unwrap().is_none());

    let err = Mutation::remove_cart(db, cart.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn cart_total_reads_live_prices() {
    let db = &setup_db().await;
    let user = seed_user(db, "total@feastly.dev", false).await;
    let category = seed_category(db, "Mains").await;
    let food_a = seed_food(db, category.id, "Food A", "10.00").await;
    let food_b = seed_food(db, category.id, "Food B", "5.00").await;
    let (cart, _) = Mutation::get_or_create_cart(db, user.id).await.unwrap();
    Mutation::add_cart_item(db, cart.id, food_a.id, 2).await.unwrap();
    Mutation::add_cart_item(db, cart.id, food_b.id, 1).await.unwrap();

    let contents = Query::load_cart(db, cart.id).await.unwrap().unwrap();
    assert_eq!(contents.total_price(), "25.00".parse::<Decimal>().unwrap());

    // Raising a catalog price moves the cart total with it; carts carry no
    // frozen prices.
    Mutation::update_food(
        db,
        food_a.id,
        FoodPatch {
            price: Some("12.00".parse().unwrap()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let contents = Query::load_cart(db, cart.id).await.unwrap().unwrap();
    assert_eq!(contents.total_price(), "29.00".parse::<Decimal>().unwrap());
}
