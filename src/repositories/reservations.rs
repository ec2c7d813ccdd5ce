//! Reservation persistence, including the booking conflict checker.
//!
//! Mutations that must uphold the no-overlapping-approved-bookings invariant
//! run inside a transaction holding a per-place advisory lock, so the
//! check-then-write sequence cannot race with a concurrent booking on the
//! same place.

use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};

use crate::models::reservation::Reservation;

/// Returns true when an Approved reservation on the place overlaps the
/// half-open range `[start_date, end_date)`. `exclude_id` omits a
/// reservation from consideration so an update does not conflict with the
/// row being updated.
pub async fn has_conflicting_reservations<'e, E>(
    executor: E,
    place_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS ( \
            SELECT 1 FROM reservations \
            WHERE place_id = $1 \
              AND status = 'approved' \
              AND $2 < end_date \
              AND $3 > start_date \
              AND ($4::TEXT IS NULL OR id <> $4) \
         )",
    )
    .bind(place_id)
    .bind(start_date)
    .bind(end_date)
    .bind(exclude_id)
    .fetch_one(executor)
    .await
}

pub async fn list_reservations_for_place(
    pool: &PgPool,
    place_id: &str,
) -> Result<Vec<Reservation>, sqlx::Error> {
    sqlx::query_as::<_, Reservation>(
        "SELECT id, place_id, user_id, start_date, end_date, status, price, \
         created_at, updated_at FROM reservations WHERE place_id = $1 \
         ORDER BY start_date ASC, created_at ASC",
    )
    .bind(place_id)
    .fetch_all(pool)
    .await
}

pub async fn find_reservation_by_id(
    pool: &PgPool,
    reservation_id: &str,
) -> Result<Option<Reservation>, sqlx::Error> {
    sqlx::query_as::<_, Reservation>(
        "SELECT id, place_id, user_id, start_date, end_date, status, price, \
         created_at, updated_at FROM reservations WHERE id = $1",
    )
    .bind(reservation_id)
    .fetch_optional(pool)
    .await
}

async fn insert_reservation<'e, E>(executor: E, reservation: &Reservation) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO reservations \
            (id, place_id, user_id, start_date, end_date, status, price, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(&reservation.id)
    .bind(&reservation.place_id)
    .bind(&reservation.user_id)
    .bind(reservation.start_date)
    .bind(reservation.end_date)
    .bind(reservation.status.as_str())
    .bind(reservation.price)
    .bind(reservation.created_at)
    .bind(reservation.updated_at)
    .execute(executor)
    .await
    .map(|_| ())
}

async fn update_reservation<'e, E>(executor: E, reservation: &Reservation) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "UPDATE reservations SET start_date = $1, end_date = $2, status = $3, price = $4, \
         updated_at = $5 WHERE id = $6",
    )
    .bind(reservation.start_date)
    .bind(reservation.end_date)
    .bind(reservation.status.as_str())
    .bind(reservation.price)
    .bind(reservation.updated_at)
    .bind(&reservation.id)
    .execute(executor)
    .await
    .map(|_| ())
}

async fn lock_place<'e, E>(executor: E, place_id: &str) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(place_id)
        .execute(executor)
        .await
        .map(|_| ())
}

/// Inserts a reservation unless it overlaps an Approved one. Returns whether
/// the row was written; `false` means a conflict and nothing changed.
pub async fn insert_reservation_if_free(
    pool: &PgPool,
    reservation: &Reservation,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    lock_place(&mut *tx, &reservation.place_id).await?;

    let conflicting = has_conflicting_reservations(
        &mut *tx,
        &reservation.place_id,
        reservation.start_date,
        reservation.end_date,
        None,
    )
    .await?;
    if conflicting {
        tx.rollback().await?;
        return Ok(false);
    }

    insert_reservation(&mut *tx, reservation).await?;
    tx.commit().await?;
    Ok(true)
}

/// Applies an update unless the new range overlaps another Approved
/// reservation. The row itself is excluded from the check.
pub async fn update_reservation_if_free(
    pool: &PgPool,
    reservation: &Reservation,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    lock_place(&mut *tx, &reservation.place_id).await?;

    let conflicting = has_conflicting_reservations(
        &mut *tx,
        &reservation.place_id,
        reservation.start_date,
        reservation.end_date,
        Some(&reservation.id),
    )
    .await?;
    if conflicting {
        tx.rollback().await?;
        return Ok(false);
    }

    update_reservation(&mut *tx, reservation).await?;
    tx.commit().await?;
    Ok(true)
}

pub async fn delete_reservation(pool: &PgPool, reservation_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM reservations WHERE id = $1")
        .bind(reservation_id)
        .execute(pool)
        .await
        .map(|_| ())
}
