//! Plain-function data access over the Postgres pool.

pub mod places;
pub mod reservations;
pub mod reviews;
pub mod sessions;
pub mod users;
