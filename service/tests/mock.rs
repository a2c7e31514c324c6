use chrono::Utc;
use entity::food;
use feastly_service::sea_orm::{
    DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult,
};
use feastly_service::{Mutation, OrderService, Query, ServiceError};

fn sample_food(id: i32) -> food::Model {
    let now = Utc::now();
    food::Model {
        id,
        name: "Chicken Biryani".to_owned(),
        description: "Aromatic rice with spiced chicken".to_owned(),
        price: "220.00".parse().unwrap(),
        stock: 40,
        category_id: 1,
        is_special: true,
        discount_percent: 10,
        created_at: now,
        updated_at: now,
    }
}

fn prepare_mock_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![sample_food(1)], Vec::<food::Model>::new()])
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection()
}

#[tokio::test]
async fn main() {
    let db = &prepare_mock_db();

    {
        let food = Query::find_food_by_id(db, 1).await.unwrap().unwrap();

        assert_eq!(food.id, 1);
        assert_eq!(food.price_with_discount(), "198.00".parse().unwrap());
    }

    {
        let food = Query::find_food_by_id(db, 404).await.unwrap();

        assert!(food.is_none());
    }

    {
        Mutation::remove_cart_item(db, 11).await.unwrap();
    }

    {
        let err = Mutation::remove_cart_item(db, 12).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    {
        OrderService::delete_order(db, 7).await.unwrap();
    }
}
