//! Request payload validation.
//!
//! DTOs derive `validator::Validate`; custom rules shared by several
//! payloads live in [`rules`].

pub mod rules;

pub use validator::Validate;
