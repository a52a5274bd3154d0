pub mod auth;
pub mod master_data;
pub mod organizations;
pub mod pricing;
pub mod registration;
