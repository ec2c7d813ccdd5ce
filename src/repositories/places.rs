use sqlx::PgPool;

use crate::models::place::Place;

pub async fn list_places(pool: &PgPool) -> Result<Vec<Place>, sqlx::Error> {
    sqlx::query_as::<_, Place>(
        "SELECT id, rooms_count, size, address, description, price, owner_id, \
         created_at, updated_at FROM places ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_place_by_id(pool: &PgPool, place_id: &str) -> Result<Option<Place>, sqlx::Error> {
    sqlx::query_as::<_, Place>(
        "SELECT id, rooms_count, size, address, description, price, owner_id, \
         created_at, updated_at FROM places WHERE id = $1",
    )
    .bind(place_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_place(pool: &PgPool, place: &Place) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO places \
            (id, rooms_count, size, address, description, price, owner_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(&place.id)
    .bind(place.rooms_count)
    .bind(place.size)
    .bind(&place.address)
    .bind(&place.description)
    .bind(place.price)
    .bind(&place.owner_id)
    .bind(place.created_at)
    .bind(place.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn update_place(pool: &PgPool, place: &Place) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE places SET rooms_count = $1, size = $2, address = $3, description = $4, \
         price = $5, updated_at = $6 WHERE id = $7",
    )
    .bind(place.rooms_count)
    .bind(place.size)
    .bind(&place.address)
    .bind(&place.description)
    .bind(place.price)
    .bind(place.updated_at)
    .bind(&place.id)
    .execute(pool)
    .await
    .map(|_| ())
}

/// Removes a place. Its reservations (and their reviews) go with it via the
/// cascading foreign keys.
pub async fn delete_place(pool: &PgPool, place_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM places WHERE id = $1")
        .bind(place_id)
        .execute(pool)
        .await
        .map(|_| ())
}
