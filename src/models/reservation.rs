//! Models for time-ranged bookings against a place.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{place::Place, user::User};

/// A booking request for a place over a half-open date range
/// `[start_date, end_date)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: String,
    pub place_id: String,
    /// User that created the booking.
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle states of a reservation. Only `Approved` reservations block
/// other bookings on the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Finished,
    Canceled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Finished => "finished",
            ReservationStatus::Canceled => "canceled",
        }
    }

    /// Parses a status name submitted by a client, tolerating casing.
    pub fn parse(value: &str) -> Option<ReservationStatus> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ReservationStatus::Pending),
            "approved" => Some(ReservationStatus::Approved),
            "finished" => Some(ReservationStatus::Finished),
            "canceled" => Some(ReservationStatus::Canceled),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Zero means "derive from the place's nightly rate".
    #[serde(default)]
    pub price: f64,
}

/// Full-replacement update. The status travels as a string and is parsed
/// into [`ReservationStatus`]; unknown names are rejected with 422.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateReservationRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationResponse {
    pub id: String,
    pub place_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub price: f64,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        ReservationResponse {
            id: reservation.id,
            place_id: reservation.place_id,
            user_id: reservation.user_id,
            created_at: reservation.created_at,
            start_date: reservation.start_date,
            end_date: reservation.end_date,
            status: reservation.status,
            price: reservation.price,
        }
    }
}

/// Number of whole rental days in `[start, end)`.
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Resolves the price for a booking: a caller-supplied non-zero price wins,
/// otherwise whole days times the place's nightly rate.
pub fn resolve_price(
    requested: f64,
    start: NaiveDate,
    end: NaiveDate,
    nightly_rate: f64,
) -> f64 {
    if requested != 0.0 {
        requested
    } else {
        rental_days(start, end) as f64 * nightly_rate
    }
}

impl Reservation {
    pub fn new(
        place_id: String,
        user_id: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        price: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            place_id,
            user_id,
            start_date,
            end_date,
            status: ReservationStatus::Pending,
            price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Capability check for mutating endpoints: the booking's creator, the
    /// place's owner, or an admin.
    pub fn can_be_modified_by(&self, user: &User, place: &Place) -> bool {
        user.id == self.user_id || user.id == place.owner_id || user.is_admin()
    }
}
