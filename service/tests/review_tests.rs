mod common;

use common::{seed_category, seed_food, seed_user, setup_db};
use feastly_service::{Mutation, NewReview, Query, ReviewPatch, ServiceError};

#[tokio::test]
async fn one_review_per_user_and_food() {
    let db = &setup_db().await;
    let reviewer = seed_user(db, "reviewer@feastly.dev", false).await;
    let second = seed_user(db, "second@feastly.dev", false).await;
    let category = seed_category(db, "Mains").await;
    let food = seed_food(db, category.id, "Biryani", "220.00").await;

    let review = Mutation::create_review(
        db,
        food.id,
        reviewer.id,
        NewReview {
            ratings: 5,
            comment: "Generous portion".to_owned(),
        },
    )
    .await
    .unwrap();
    assert_eq!(review.ratings, 5);

    let err = Mutation::create_review(
        db,
        food.id,
        reviewer.id,
        NewReview {
            ratings: 4,
            comment: "Trying again".to_owned(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    Mutation::create_review(
        db,
        food.id,
        second.id,
        NewReview {
            ratings: 3,
            comment: "A bit dry".to_owned(),
        },
    )
    .await
    .unwrap();

    let reviews = Query::find_reviews_for_food(db, food.id).await.unwrap();
    assert_eq!(reviews.len(), 2);
}

#[tokio::test]
async fn ratings_must_stay_in_range() {
    let db = &setup_db().await;
    let reviewer = seed_user(db, "range@feastly.dev", false).await;
    let category = seed_category(db, "Drinks").await;
    let food = seed_food(db, category.id, "Lassi", "90.00").await;

    for ratings in [0, 6] {
        let err = Mutation::create_review(
            db,
            food.id,
            reviewer.id,
            NewReview {
                ratings,
                comment: "out of range".to_owned(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    let err = Mutation::create_review(
        db,
        9999,
        reviewer.id,
        NewReview {
            ratings: 4,
            comment: "no such food".to_owned(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn only_the_author_may_edit() {
    let db = &setup_db().await;
    let author = seed_user(db, "author@feastly.dev", false).await;
    let stranger = seed_user(db, "reader@feastly.dev", false).await;
    let admin = seed_user(db, "mod@feastly.dev", true).await;
    let category = seed_category(db, "Mains").await;
    let food = seed_food(db, category.id, "Tehari", "180.00").await;

    let review = Mutation::create_review(
        db,
        food.id,
        author.id,
        NewReview {
            ratings: 2,
            comment: "Undercooked".to_owned(),
        },
    )
    .await
    .unwrap();

    let err = Mutation::update_review(
        db,
        review.id,
        &stranger,
        ReviewPatch {
            ratings: Some(5),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::PermissionDenied(_)));

    // The staff flag grants no say over someone else's review.
    let err = Mutation::update_review(
        db,
        review.id,
        &admin,
        ReviewPatch {
            ratings: Some(5),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::PermissionDenied(_)));

    let edited = Mutation::update_review(
        db,
        review.id,
        &author,
        ReviewPatch {
            ratings: Some(3),
            comment: Some("Better on a second visit".to_owned()),
        },
    )
    .await
    .unwrap();
    assert_eq!(edited.ratings, 3);

    let err = Mutation::delete_review(db, review.id, &stranger)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::PermissionDenied(_)));

    let err = Mutation::delete_review(db, review.id, &admin)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::PermissionDenied(_)));

    Mutation::delete_review(db, review.id, &author).await.unwrap();
    assert!(Query::find_review_by_id(db, review.id)
        .await
        .unwrap()
        .is_none());

    let err = Mutation::delete_review(db, review.id, &author)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
