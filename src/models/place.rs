//! Models for rental listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::User;

/// A rentable listing. `price` is the nightly rate used to derive reservation
/// prices when the caller leaves the price unset.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Place {
    pub id: String,
    pub rooms_count: i32,
    /// Size in area units.
    pub size: i32,
    pub address: String,
    pub description: Option<String>,
    pub price: f64,
    /// User that listed the place.
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlaceRequest {
    #[validate(range(min = 1, max = 19))]
    pub rooms_count: i32,
    #[validate(range(min = 1, max = 999))]
    pub size: i32,
    #[validate(length(min = 5, max = 100))]
    pub address: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub price: f64,
}

/// Full-replacement update payload; same bounds as creation.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlaceRequest {
    #[validate(range(min = 1, max = 19))]
    pub rooms_count: i32,
    #[validate(range(min = 1, max = 999))]
    pub size: i32,
    #[validate(length(min = 5, max = 100))]
    pub address: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceResponse {
    pub id: String,
    pub rooms_count: i32,
    pub size: i32,
    pub address: String,
    pub description: Option<String>,
    pub price: f64,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Place> for PlaceResponse {
    fn from(place: Place) -> Self {
        PlaceResponse {
            id: place.id,
            rooms_count: place.rooms_count,
            size: place.size,
            address: place.address,
            description: place.description,
            price: place.price,
            owner_id: place.owner_id,
            created_at: place.created_at,
        }
    }
}

impl Place {
    pub fn new(owner_id: String, payload: CreatePlaceRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            rooms_count: payload.rooms_count,
            size: payload.size,
            address: payload.address,
            description: payload.description,
            price: payload.price,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Capability check for mutating endpoints: the listing owner or an admin.
    pub fn can_be_modified_by(&self, user: &User) -> bool {
        user.id == self.owner_id || user.is_admin()
    }

    pub fn apply_update(&mut self, payload: UpdatePlaceRequest) {
        self.rooms_count = payload.rooms_count;
        self.size = payload.size;
        self.address = payload.address;
        self.description = payload.description;
        self.price = payload.price;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;

    fn sample_payload() -> CreatePlaceRequest {
        CreatePlaceRequest {
            rooms_count: 2,
            size: 50,
            address: "1 Apple Street".into(),
            description: None,
            price: 100.0,
        }
    }

    #[test]
    fn create_payload_rejects_out_of_range_values() {
        let mut payload = sample_payload();
        payload.price = -1.0;
        assert!(payload.validate().is_err());

        let mut payload = sample_payload();
        payload.rooms_count = 0;
        assert!(payload.validate().is_err());

        let mut payload = sample_payload();
        payload.address = "1 A".into();
        assert!(payload.validate().is_err());

        assert!(sample_payload().validate().is_ok());
    }

    #[test]
    fn owner_and_admin_can_modify() {
        let owner = User::new(
            "owner".into(),
            "owner@example.com".into(),
            "hash".into(),
            vec![UserRole::Owner],
        );
        let admin = User::new(
            "admin".into(),
            "admin@example.com".into(),
            "hash".into(),
            vec![UserRole::Admin],
        );
        let stranger = User::new(
            "other".into(),
            "other@example.com".into(),
            "hash".into(),
            vec![UserRole::Tenant],
        );

        let place = Place::new(owner.id.clone(), sample_payload());
        assert!(place.can_be_modified_by(&owner));
        assert!(place.can_be_modified_by(&admin));
        assert!(!place.can_be_modified_by(&stranger));
    }

    #[test]
    fn apply_update_replaces_fields_and_touches_timestamp() {
        let mut place = Place::new("owner-1".into(), sample_payload());
        let before = place.updated_at;
        place.apply_update(UpdatePlaceRequest {
            rooms_count: 3,
            size: 75,
            address: "2 Pear Avenue".into(),
            description: Some("renovated".into()),
            price: 150.0,
        });
        assert_eq!(place.rooms_count, 3);
        assert_eq!(place.price, 150.0);
        assert_eq!(place.description.as_deref(), Some("renovated"));
        assert!(place.updated_at >= before);
    }
}
