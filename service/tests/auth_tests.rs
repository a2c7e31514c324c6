mod common;

use chrono::Utc;
use common::{seed_user, setup_db};
use entity::access_token;
use entity::sea_orm::{ActiveModelTrait, Set};
use feastly_service::Query;
use uuid::Uuid;

#[tokio::test]
async fn bearer_tokens_resolve_to_their_user() {
    let db = setup_db().await;
    let user = seed_user(&db, "demo@feastly.dev", false).await;

    let token = Uuid::new_v4();
    access_token::ActiveModel {
        user_id: Set(user.id),
        token: Set(token),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    let resolved = Query::find_user_by_token(&db, token).await.unwrap();
    assert_eq!(resolved.map(|found| found.id), Some(user.id));
}

#[tokio::test]
async fn unknown_tokens_resolve_to_nobody() {
    let db = setup_db().await;
    seed_user(&db, "demo@feastly.dev", false).await;

    let resolved = Query::find_user_by_token(&db, Uuid::new_v4()).await.unwrap();
    assert!(resolved.is_none());
}
