//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod country_repo;
pub mod currency_repo;
pub mod lookup_repo;
pub mod membership_tier_repo;
pub mod organization_repo;
pub mod pricing_override_repo;
pub mod pricing_rule_repo;
pub mod pricing_template_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use country_repo::CountryRepo;
pub use currency_repo::CurrencyRepo;
pub use lookup_repo::LookupRepo;
pub use membership_tier_repo::MembershipTierRepo;
pub use organization_repo::OrganizationRepo;
pub use pricing_override_repo::PricingOverrideRepo;
pub use pricing_rule_repo::PricingRuleRepo;
pub use pricing_template_repo::PricingTemplateRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
