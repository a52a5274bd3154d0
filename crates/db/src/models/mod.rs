//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod category;
pub mod country;
pub mod currency;
pub mod lookup;
pub mod membership_tier;
pub mod organization;
pub mod pricing;
pub mod role;
pub mod session;
pub mod user;
