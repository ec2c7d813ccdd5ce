//! CRUD over rental listings. Reads are public; mutations require the Owner
//! role (create) or the place's owner/an admin (update, delete).

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        place::{CreatePlaceRequest, Place, PlaceResponse, UpdatePlaceRequest},
        user::User,
    },
    repositories::places as place_repo,
    state::AppState,
};

pub async fn list_places(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlaceResponse>>, AppError> {
    let places = place_repo::list_places(&state.pool).await?;
    Ok(Json(places.into_iter().map(PlaceResponse::from).collect()))
}

pub async fn get_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<PlaceResponse>, AppError> {
    let place = find_place_or_404(&state, &place_id).await?;
    Ok(Json(PlaceResponse::from(place)))
}

pub async fn create_place(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreatePlaceRequest>,
) -> Result<(StatusCode, Json<PlaceResponse>), AppError> {
    if !user.is_owner() {
        return Err(AppError::Forbidden(
            "Only owners can create places".to_string(),
        ));
    }
    payload.validate()?;

    let place = Place::new(user.id, payload);
    place_repo::insert_place(&state.pool, &place).await?;

    tracing::info!(place_id = %place.id, owner_id = %place.owner_id, "Created place");
    Ok((StatusCode::CREATED, Json(PlaceResponse::from(place))))
}

pub async fn update_place(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(place_id): Path<String>,
    Json(payload): Json<UpdatePlaceRequest>,
) -> Result<Json<PlaceResponse>, AppError> {
    let mut place = find_place_or_404(&state, &place_id).await?;
    if !place.can_be_modified_by(&user) {
        return Err(AppError::Forbidden(
            "Not allowed to modify this place".to_string(),
        ));
    }
    payload.validate()?;

    place.apply_update(payload);
    place_repo::update_place(&state.pool, &place).await?;

    Ok(Json(PlaceResponse::from(place)))
}

pub async fn delete_place(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(place_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let place = find_place_or_404(&state, &place_id).await?;
    if !place.can_be_modified_by(&user) {
        return Err(AppError::Forbidden(
            "Not allowed to delete this place".to_string(),
        ));
    }

    place_repo::delete_place(&state.pool, &place.id).await?;
    tracing::info!(place_id = %place.id, "Deleted place");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn find_place_or_404(
    state: &AppState,
    place_id: &str,
) -> Result<Place, AppError> {
    place_repo::find_place_by_id(&state.pool, place_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Place not found".to_string()))
}
