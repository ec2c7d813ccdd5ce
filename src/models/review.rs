//! Models for post-stay reviews, one per reservation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{place::Place, user::User};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: String,
    /// Reservation being reviewed; at most one review per reservation.
    pub reservation_id: String,
    /// Author of the review.
    pub user_id: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(min = 1, message = "comment must not be empty"))]
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(min = 1, message = "comment must not be empty"))]
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: String,
    pub reservation_id: String,
    pub user_id: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id,
            reservation_id: review.reservation_id,
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

impl Review {
    pub fn new(reservation_id: String, user_id: String, rating: i32, comment: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            reservation_id,
            user_id,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        }
    }

    /// Capability check for mutating endpoints: the author or an admin, but
    /// never the owner of the reviewed place (no self-reviews by the lister).
    pub fn can_be_modified_by(&self, user: &User, place: &Place) -> bool {
        if user.id == place.owner_id {
            return false;
        }
        user.id == self.user_id || user.is_admin()
    }
}
