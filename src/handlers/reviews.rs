//! Review endpoints. A reservation carries at most one review, written by
//! the tenant who booked it; the place's owner can never review their own
//! listing.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        place::Place,
        reservation::Reservation,
        review::{CreateReviewRequest, Review, ReviewResponse, UpdateReviewRequest},
        user::User,
    },
    repositories::reviews as review_repo,
    state::AppState,
};

use super::{places::find_place_or_404, reservations::find_reservation_or_404};

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let place = find_place_or_404(&state, &place_id).await?;
    let reviews = review_repo::list_reviews_for_place(&state.pool, &place.id).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

pub async fn get_review(
    State(state): State<AppState>,
    Path((place_id, reservation_id)): Path<(String, String)>,
) -> Result<Json<ReviewResponse>, AppError> {
    let place = find_place_or_404(&state, &place_id).await?;
    find_scoped_reservation(&state, &place, &reservation_id).await?;

    let review = review_repo::find_review_by_reservation(&state.pool, &reservation_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;
    Ok(Json(ReviewResponse::from(review)))
}

pub async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((place_id, reservation_id)): Path<(String, String)>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    if !user.is_tenant() {
        return Err(AppError::Forbidden(
            "Reviewing requires the Tenant role".to_string(),
        ));
    }

    let place = find_place_or_404(&state, &place_id).await?;
    let reservation = find_scoped_reservation(&state, &place, &reservation_id).await?;

    if user.id != reservation.user_id {
        return Err(AppError::Forbidden(
            "Only the booking's creator can review it".to_string(),
        ));
    }
    if user.id == place.owner_id {
        return Err(AppError::Forbidden(
            "Owners cannot review their own place".to_string(),
        ));
    }
    payload.validate()?;

    if review_repo::find_review_by_reservation(&state.pool, &reservation.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "A review for this reservation already exists".to_string(),
        ));
    }

    let review = Review::new(reservation.id, user.id, payload.rating, payload.comment);
    review_repo::insert_review(&state.pool, &review).await?;

    tracing::info!(review_id = %review.id, reservation_id = %review.reservation_id, "Created review");
    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}

pub async fn update_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((place_id, reservation_id, review_id)): Path<(String, String, String)>,
    Json(payload): Json<UpdateReviewRequest>,
) -> Result<Json<ReviewResponse>, AppError> {
    let place = find_place_or_404(&state, &place_id).await?;
    find_scoped_reservation(&state, &place, &reservation_id).await?;
    let mut review = find_scoped_review(&state, &reservation_id, &review_id).await?;

    if !review.can_be_modified_by(&user, &place) {
        return Err(AppError::Forbidden(
            "Not allowed to modify this review".to_string(),
        ));
    }
    payload.validate()?;

    review.rating = payload.rating;
    review.comment = payload.comment;
    review.updated_at = chrono::Utc::now();
    review_repo::update_review(&state.pool, &review).await?;

    Ok(Json(ReviewResponse::from(review)))
}

pub async fn delete_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((place_id, reservation_id, review_id)): Path<(String, String, String)>,
) -> Result<StatusCode, AppError> {
    let place = find_place_or_404(&state, &place_id).await?;
    find_scoped_reservation(&state, &place, &reservation_id).await?;
    let review = find_scoped_review(&state, &reservation_id, &review_id).await?;

    if !review.can_be_modified_by(&user, &place) {
        return Err(AppError::Forbidden(
            "Not allowed to delete this review".to_string(),
        ));
    }

    review_repo::delete_review(&state.pool, &review.id).await?;
    tracing::info!(review_id = %review.id, "Deleted review");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_scoped_reservation(
    state: &AppState,
    place: &Place,
    reservation_id: &str,
) -> Result<Reservation, AppError> {
    let reservation = find_reservation_or_404(state, reservation_id).await?;
    if reservation.place_id != place.id {
        return Err(AppError::NotFound(
            "Reservation not found for this place".to_string(),
        ));
    }
    Ok(reservation)
}

async fn find_scoped_review(
    state: &AppState,
    reservation_id: &str,
    review_id: &str,
) -> Result<Review, AppError> {
    let review = review_repo::find_review_by_id(&state.pool, review_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;
    if review.reservation_id != reservation_id {
        return Err(AppError::BadRequest(
            "Review does not belong to the specified reservation".to_string(),
        ));
    }
    Ok(review)
}
