use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;

use rental_backend::{
    error::AppError,
    handlers::reviews::{create_review, delete_review, get_review, list_reviews, update_review},
    models::{
        reservation::ReservationStatus,
        review::{CreateReviewRequest, UpdateReviewRequest},
        user::UserRole,
    },
};

mod support;
use support::{date, seed_place, seed_reservation, seed_review, seed_user, test_state};

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

#[sqlx::test(migrations = "./migrations")]
async fn create_requires_tenant_role_and_booking_authorship(pool: PgPool) {
    init_tracing();
    let owner = seed_user(&pool, &[UserRole::Owner]).await;
    let tenant = seed_user(&pool, &[UserRole::Tenant]).await;
    let place = seed_place(&pool, &owner, 100.0).await;
    let reservation = seed_reservation(
        &pool,
        &place,
        &tenant,
        date(2024, 1, 1),
        date(2024, 1, 3),
        ReservationStatus::Finished,
    )
    .await;

    let payload = || CreateReviewRequest {
        rating: 5,
        comment: "lovely stay".into(),
    };

    // Owner role alone is not enough to review.
    let err = create_review(
        State(test_state(&pool)),
        Extension(owner.clone()),
        Path((place.id.clone(), reservation.id.clone())),
        Json(payload()),
    )
    .await
    .expect_err("owner is not a tenant");
    assert!(matches!(err, AppError::Forbidden(_)));

    // A tenant that did not make the booking cannot review it.
    let other_tenant = seed_user(&pool, &[UserRole::Tenant]).await;
    let err = create_review(
        State(test_state(&pool)),
        Extension(other_tenant),
        Path((place.id.clone(), reservation.id.clone())),
        Json(payload()),
    )
    .await
    .expect_err("not the booking's creator");
    assert!(matches!(err, AppError::Forbidden(_)));

    // The booking's creator can.
    let (status, Json(review)) = create_review(
        State(test_state(&pool)),
        Extension(tenant.clone()),
        Path((place.id.clone(), reservation.id.clone())),
        Json(payload()),
    )
    .await
    .expect("create ok");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(review.user_id, tenant.id);
    assert_eq!(review.reservation_id, reservation.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn place_owner_cannot_review_their_own_listing(pool: PgPool) {
    init_tracing();
    // The lister also holds the Tenant role and booked their own place.
    let owner = seed_user(&pool, &[UserRole::Owner, UserRole::Tenant]).await;
    let place = seed_place(&pool, &owner, 100.0).await;
    let reservation = seed_reservation(
        &pool,
        &place,
        &owner,
        date(2024, 1, 1),
        date(2024, 1, 3),
        ReservationStatus::Finished,
    )
    .await;

    let err = create_review(
        State(test_state(&pool)),
        Extension(owner),
        Path((place.id.clone(), reservation.id.clone())),
        Json(CreateReviewRequest {
            rating: 5,
            comment: "best place ever".into(),
        }),
    )
    .await
    .expect_err("self-review by the lister");
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn second_review_for_a_reservation_conflicts(pool: PgPool) {
    init_tracing();
    let owner = seed_user(&pool, &[UserRole::Owner]).await;
    let tenant = seed_user(&pool, &[UserRole::Tenant]).await;
    let place = seed_place(&pool, &owner, 100.0).await;
    let reservation = seed_reservation(
        &pool,
        &place,
        &tenant,
        date(2024, 1, 1),
        date(2024, 1, 3),
        ReservationStatus::Finished,
    )
    .await;
    seed_review(&pool, &reservation, &tenant, 4, "good").await;

    let err = create_review(
        State(test_state(&pool)),
        Extension(tenant),
        Path((place.id.clone(), reservation.id.clone())),
        Json(CreateReviewRequest {
            rating: 1,
            comment: "changed my mind".into(),
        }),
    )
    .await
    .expect_err("one review per reservation");
    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn create_validates_rating_and_comment(pool: PgPool) {
    init_tracing();
    let owner = seed_user(&pool, &[UserRole::Owner]).await;
    let tenant = seed_user(&pool, &[UserRole::Tenant]).await;
    let place = seed_place(&pool, &owner, 100.0).await;
    let reservation = seed_reservation(
        &pool,
        &place,
        &tenant,
        date(2024, 1, 1),
        date(2024, 1, 3),
        ReservationStatus::Finished,
    )
    .await;

    let err = create_review(
        State(test_state(&pool)),
        Extension(tenant.clone()),
        Path((place.id.clone(), reservation.id.clone())),
        Json(CreateReviewRequest {
            rating: 6,
            comment: "off the scale".into(),
        }),
    )
    .await
    .expect_err("rating above 5");
    assert!(matches!(err, AppError::Validation(_)));

    let err = create_review(
        State(test_state(&pool)),
        Extension(tenant),
        Path((place.id.clone(), reservation.id.clone())),
        Json(CreateReviewRequest {
            rating: 3,
            comment: "".into(),
        }),
    )
    .await
    .expect_err("empty comment");
    assert!(matches!(err, AppError::Validation(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn update_and_delete_follow_the_capability_rule(pool: PgPool) {
    init_tracing();
    let owner = seed_user(&pool, &[UserRole::Owner]).await;
    let tenant = seed_user(&pool, &[UserRole::Tenant]).await;
    let admin = seed_user(&pool, &[UserRole::Admin]).await;
    let place = seed_place(&pool, &owner, 100.0).await;
    let reservation = seed_reservation(
        &pool,
        &place,
        &tenant,
        date(2024, 1, 1),
        date(2024, 1, 3),
        ReservationStatus::Finished,
    )
    .await;
    let review = seed_review(&pool, &reservation, &tenant, 4, "good").await;

    let err = update_review(
        State(test_state(&pool)),
        Extension(owner),
        Path((place.id.clone(), reservation.id.clone(), review.id.clone())),
        Json(UpdateReviewRequest {
            rating: 5,
            comment: "glowing".into(),
        }),
    )
    .await
    .expect_err("the lister cannot touch reviews of their place");
    assert!(matches!(err, AppError::Forbidden(_)));

    let Json(updated) = update_review(
        State(test_state(&pool)),
        Extension(tenant),
        Path((place.id.clone(), reservation.id.clone(), review.id.clone())),
        Json(UpdateReviewRequest {
            rating: 2,
            comment: "on reflection, noisy".into(),
        }),
    )
    .await
    .expect("author updates own review");
    assert_eq!(updated.rating, 2);

    let status = delete_review(
        State(test_state(&pool)),
        Extension(admin),
        Path((place.id.clone(), reservation.id.clone(), review.id.clone())),
    )
    .await
    .expect("admin deletes");
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "./migrations")]
async fn get_and_list_reviews(pool: PgPool) {
    init_tracing();
    let owner = seed_user(&pool, &[UserRole::Owner]).await;
    let tenant = seed_user(&pool, &[UserRole::Tenant]).await;
    let place = seed_place(&pool, &owner, 100.0).await;
    let reservation = seed_reservation(
        &pool,
        &place,
        &tenant,
        date(2024, 1, 1),
        date(2024, 1, 3),
        ReservationStatus::Finished,
    )
    .await;

    let err = get_review(
        State(test_state(&pool)),
        Path((place.id.clone(), reservation.id.clone())),
    )
    .await
    .expect_err("no review yet");
    assert!(matches!(err, AppError::NotFound(_)));

    seed_review(&pool, &reservation, &tenant, 4, "good").await;

    let Json(found) = get_review(
        State(test_state(&pool)),
        Path((place.id.clone(), reservation.id.clone())),
    )
    .await
    .expect("get ok");
    assert_eq!(found.reservation_id, reservation.id);

    let Json(reviews) = list_reviews(State(test_state(&pool)), Path(place.id.clone()))
        .await
        .expect("list ok");
    assert_eq!(reviews.len(), 1);
}
