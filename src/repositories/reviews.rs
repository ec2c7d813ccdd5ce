use sqlx::PgPool;

use crate::models::review::Review;

pub async fn find_review_by_id(
    pool: &PgPool,
    review_id: &str,
) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "SELECT id, reservation_id, user_id, rating, comment, created_at, updated_at \
         FROM reviews WHERE id = $1",
    )
    .bind(review_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_review_by_reservation(
    pool: &PgPool,
    reservation_id: &str,
) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "SELECT id, reservation_id, user_id, rating, comment, created_at, updated_at \
         FROM reviews WHERE reservation_id = $1",
    )
    .bind(reservation_id)
    .fetch_optional(pool)
    .await
}

/// All reviews attached to a place's reservations.
pub async fn list_reviews_for_place(
    pool: &PgPool,
    place_id: &str,
) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "SELECT r.id, r.reservation_id, r.user_id, r.rating, r.comment, r.created_at, r.updated_at \
         FROM reviews r \
         JOIN reservations res ON res.id = r.reservation_id \
         WHERE res.place_id = $1 \
         ORDER BY r.created_at DESC",
    )
    .bind(place_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_review(pool: &PgPool, review: &Review) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO reviews (id, reservation_id, user_id, rating, comment, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(&review.id)
    .bind(&review.reservation_id)
    .bind(&review.user_id)
    .bind(review.rating)
    .bind(&review.comment)
    .bind(review.created_at)
    .bind(review.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn update_review(pool: &PgPool, review: &Review) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE reviews SET rating = $1, comment = $2, updated_at = $3 WHERE id = $4")
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.updated_at)
        .bind(&review.id)
        .execute(pool)
        .await
        .map(|_| ())
}

pub async fn delete_review(pool: &PgPool, review_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(review_id)
        .execute(pool)
        .await
        .map(|_| ())
}
