//! Reservation lifecycle endpoints, scoped to a place.
//!
//! Creation and updates run the booking conflict check inside a per-place
//! advisory-locked transaction; only Approved reservations block a range.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use crate::{
    error::AppError,
    models::{
        reservation::{
            resolve_price, CreateReservationRequest, Reservation, ReservationResponse,
            ReservationStatus, UpdateReservationRequest,
        },
        user::User,
    },
    repositories::reservations as reservation_repo,
    state::AppState,
};

use super::places::find_place_or_404;

pub async fn list_reservations(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let place = find_place_or_404(&state, &place_id).await?;
    let reservations =
        reservation_repo::list_reservations_for_place(&state.pool, &place.id).await?;
    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

pub async fn get_reservation(
    State(state): State<AppState>,
    Path((place_id, reservation_id)): Path<(String, String)>,
) -> Result<Json<ReservationResponse>, AppError> {
    find_place_or_404(&state, &place_id).await?;
    let reservation = find_reservation_or_404(&state, &reservation_id).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

pub async fn create_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(place_id): Path<String>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    if !(user.is_tenant() || user.is_owner() || user.is_admin()) {
        return Err(AppError::Forbidden(
            "Booking requires the Tenant or Owner role".to_string(),
        ));
    }

    let place = find_place_or_404(&state, &place_id).await?;
    validate_date_window(payload.start_date, payload.end_date)?;

    let price = resolve_price(
        payload.price,
        payload.start_date,
        payload.end_date,
        place.price,
    );
    let reservation = Reservation::new(
        place.id,
        user.id,
        payload.start_date,
        payload.end_date,
        price,
    );

    let inserted = reservation_repo::insert_reservation_if_free(&state.pool, &reservation).await?;
    if !inserted {
        return Err(AppError::Conflict(
            "The reservation dates overlap with an existing confirmed reservation".to_string(),
        ));
    }

    tracing::info!(
        reservation_id = %reservation.id,
        place_id = %reservation.place_id,
        "Created reservation"
    );
    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from(reservation)),
    ))
}

pub async fn update_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((place_id, reservation_id)): Path<(String, String)>,
    Json(payload): Json<UpdateReservationRequest>,
) -> Result<Json<ReservationResponse>, AppError> {
    let place = find_place_or_404(&state, &place_id).await?;
    let mut reservation = find_reservation_or_404(&state, &reservation_id).await?;
    ensure_reservation_belongs_to_place(&reservation, &place.id)?;

    if !reservation.can_be_modified_by(&user, &place) {
        return Err(AppError::Forbidden(
            "Not allowed to modify this reservation".to_string(),
        ));
    }

    let status = ReservationStatus::parse(&payload.status)
        .ok_or_else(|| AppError::UnprocessableEntity("Invalid status".to_string()))?;
    validate_date_window(payload.start_date, payload.end_date)?;

    reservation.start_date = payload.start_date;
    reservation.end_date = payload.end_date;
    reservation.status = status;
    reservation.price = payload.price;
    reservation.updated_at = chrono::Utc::now();

    let updated = reservation_repo::update_reservation_if_free(&state.pool, &reservation).await?;
    if !updated {
        return Err(AppError::Conflict(
            "The reservation dates overlap with an existing confirmed reservation".to_string(),
        ));
    }

    Ok(Json(ReservationResponse::from(reservation)))
}

pub async fn delete_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((place_id, reservation_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let place = find_place_or_404(&state, &place_id).await?;
    let reservation = find_reservation_or_404(&state, &reservation_id).await?;
    ensure_reservation_belongs_to_place(&reservation, &place.id)?;

    if !reservation.can_be_modified_by(&user, &place) {
        return Err(AppError::Forbidden(
            "Not allowed to delete this reservation".to_string(),
        ));
    }

    // The review, if one exists, goes with it via the cascading foreign key.
    reservation_repo::delete_reservation(&state.pool, &reservation.id).await?;
    tracing::info!(reservation_id = %reservation.id, "Deleted reservation");
    Ok(StatusCode::NO_CONTENT)
}

fn validate_date_window(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if start >= end {
        return Err(AppError::BadRequest(
            "start_date must be before end_date".to_string(),
        ));
    }
    Ok(())
}

fn ensure_reservation_belongs_to_place(
    reservation: &Reservation,
    place_id: &str,
) -> Result<(), AppError> {
    if reservation.place_id != place_id {
        return Err(AppError::BadRequest(
            "Reservation does not belong to the specified place".to_string(),
        ));
    }
    Ok(())
}

pub(crate) async fn find_reservation_or_404(
    state: &AppState,
    reservation_id: &str,
) -> Result<Reservation, AppError> {
    reservation_repo::find_reservation_by_id(&state.pool, reservation_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))
}
