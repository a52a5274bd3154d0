//! Pure domain logic for the seeker platform: pricing, membership,
//! registration and master-data rules. Nothing in this crate performs I/O.

pub mod error;
pub mod master_data;
pub mod membership;
pub mod pricing;
pub mod registration;
pub mod roles;
pub mod types;
