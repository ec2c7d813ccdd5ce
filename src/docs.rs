#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::models::{
    place::{CreatePlaceRequest, PlaceResponse, UpdatePlaceRequest},
    reservation::{
        CreateReservationRequest, ReservationResponse, ReservationStatus,
        UpdateReservationRequest,
    },
    review::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest},
    user::{LoginRequest, LoginResponse, RegisterRequest, UserResponse},
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        register_doc,
        login_doc,
        refresh_doc,
        logout_doc,
        list_places_doc,
        get_place_doc,
        create_place_doc,
        update_place_doc,
        delete_place_doc,
        list_reservations_doc,
        get_reservation_doc,
        create_reservation_doc,
        update_reservation_doc,
        delete_reservation_doc,
        list_reviews_doc,
        get_review_doc,
        create_review_doc,
        update_review_doc,
        delete_review_doc
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        UserResponse,
        CreatePlaceRequest,
        UpdatePlaceRequest,
        PlaceResponse,
        CreateReservationRequest,
        UpdateReservationRequest,
        ReservationResponse,
        ReservationStatus,
        CreateReviewRequest,
        UpdateReviewRequest,
        ReviewResponse
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login, and session rotation"),
        (name = "Places", description = "Rental listings"),
        (name = "Reservations", description = "Bookings scoped to a place"),
        (name = "Reviews", description = "Post-stay reviews, one per reservation")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 409, description = "Username already taken")
    ),
    tag = "Auth",
    security(())
)]
fn register_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Sets the RefreshToken cookie", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth",
    security(())
)]
fn login_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "Rotated session; new cookie set", body = LoginResponse),
        (status = 401, description = "Missing, invalid, or superseded refresh token")
    ),
    tag = "Auth",
    security(())
)]
fn refresh_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session revoked, cookie cleared"),
        (status = 401, description = "Missing or invalid refresh token")
    ),
    tag = "Auth",
    security(())
)]
fn logout_doc() {}

#[utoipa::path(
    get,
    path = "/api/places",
    responses((status = 200, body = [PlaceResponse])),
    tag = "Places",
    security(())
)]
fn list_places_doc() {}

#[utoipa::path(
    get,
    path = "/api/places/{place_id}",
    params(("place_id" = String, Path, description = "Place id")),
    responses(
        (status = 200, body = PlaceResponse),
        (status = 404, description = "Place not found")
    ),
    tag = "Places",
    security(())
)]
fn get_place_doc() {}

#[utoipa::path(
    post,
    path = "/api/places",
    request_body = CreatePlaceRequest,
    responses(
        (status = 201, body = PlaceResponse),
        (status = 403, description = "Caller lacks the Owner role")
    ),
    tag = "Places"
)]
fn create_place_doc() {}

#[utoipa::path(
    put,
    path = "/api/places/{place_id}",
    params(("place_id" = String, Path, description = "Place id")),
    request_body = UpdatePlaceRequest,
    responses(
        (status = 200, body = PlaceResponse),
        (status = 403, description = "Not the owner or an admin"),
        (status = 404, description = "Place not found")
    ),
    tag = "Places"
)]
fn update_place_doc() {}

#[utoipa::path(
    delete,
    path = "/api/places/{place_id}",
    params(("place_id" = String, Path, description = "Place id")),
    responses(
        (status = 204, description = "Deleted, reservations cascade"),
        (status = 403, description = "Not the owner or an admin"),
        (status = 404, description = "Place not found")
    ),
    tag = "Places"
)]
fn delete_place_doc() {}

#[utoipa::path(
    get,
    path = "/api/places/{place_id}/reservations",
    params(("place_id" = String, Path, description = "Place id")),
    responses(
        (status = 200, body = [ReservationResponse]),
        (status = 404, description = "Place not found")
    ),
    tag = "Reservations",
    security(())
)]
fn list_reservations_doc() {}

#[utoipa::path(
    get,
    path = "/api/places/{place_id}/reservations/{reservation_id}",
    params(
        ("place_id" = String, Path, description = "Place id"),
        ("reservation_id" = String, Path, description = "Reservation id")
    ),
    responses(
        (status = 200, body = ReservationResponse),
        (status = 404, description = "Place or reservation not found")
    ),
    tag = "Reservations",
    security(())
)]
fn get_reservation_doc() {}

#[utoipa::path(
    post,
    path = "/api/places/{place_id}/reservations",
    params(("place_id" = String, Path, description = "Place id")),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, body = ReservationResponse),
        (status = 409, description = "Dates overlap an approved reservation"),
        (status = 404, description = "Place not found")
    ),
    tag = "Reservations"
)]
fn create_reservation_doc() {}

#[utoipa::path(
    put,
    path = "/api/places/{place_id}/reservations/{reservation_id}",
    params(
        ("place_id" = String, Path, description = "Place id"),
        ("reservation_id" = String, Path, description = "Reservation id")
    ),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, body = ReservationResponse),
        (status = 409, description = "Dates overlap an approved reservation"),
        (status = 422, description = "Unknown status name"),
        (status = 403, description = "Not the creator, place owner, or an admin")
    ),
    tag = "Reservations"
)]
fn update_reservation_doc() {}

#[utoipa::path(
    delete,
    path = "/api/places/{place_id}/reservations/{reservation_id}",
    params(
        ("place_id" = String, Path, description = "Place id"),
        ("reservation_id" = String, Path, description = "Reservation id")
    ),
    responses(
        (status = 204, description = "Deleted, review cascades"),
        (status = 400, description = "Reservation belongs to another place"),
        (status = 403, description = "Not the creator, place owner, or an admin")
    ),
    tag = "Reservations"
)]
fn delete_reservation_doc() {}

#[utoipa::path(
    get,
    path = "/api/places/{place_id}/reviews",
    params(("place_id" = String, Path, description = "Place id")),
    responses(
        (status = 200, body = [ReviewResponse]),
        (status = 404, description = "Place not found")
    ),
    tag = "Reviews",
    security(())
)]
fn list_reviews_doc() {}

#[utoipa::path(
    get,
    path = "/api/places/{place_id}/reservations/{reservation_id}/reviews",
    params(
        ("place_id" = String, Path, description = "Place id"),
        ("reservation_id" = String, Path, description = "Reservation id")
    ),
    responses(
        (status = 200, body = ReviewResponse),
        (status = 404, description = "No review for this reservation")
    ),
    tag = "Reviews",
    security(())
)]
fn get_review_doc() {}

#[utoipa::path(
    post,
    path = "/api/places/{place_id}/reservations/{reservation_id}/reviews",
    params(
        ("place_id" = String, Path, description = "Place id"),
        ("reservation_id" = String, Path, description = "Reservation id")
    ),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, body = ReviewResponse),
        (status = 409, description = "Reservation already reviewed"),
        (status = 403, description = "Not the booking's tenant, or self-review")
    ),
    tag = "Reviews"
)]
fn create_review_doc() {}

#[utoipa::path(
    put,
    path = "/api/places/{place_id}/reservations/{reservation_id}/reviews/{review_id}",
    params(
        ("place_id" = String, Path, description = "Place id"),
        ("reservation_id" = String, Path, description = "Reservation id"),
        ("review_id" = String, Path, description = "Review id")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, body = ReviewResponse),
        (status = 403, description = "Not the author or an admin")
    ),
    tag = "Reviews"
)]
fn update_review_doc() {}

#[utoipa::path(
    delete,
    path = "/api/places/{place_id}/reservations/{reservation_id}/reviews/{review_id}",
    params(
        ("place_id" = String, Path, description = "Place id"),
        ("reservation_id" = String, Path, description = "Reservation id"),
        ("review_id" = String, Path, description = "Review id")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 403, description = "Not the author or an admin")
    ),
    tag = "Reviews"
)]
fn delete_review_doc() {}
