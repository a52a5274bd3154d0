//! Master-data (reference table) kinds and field normalisation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::CoreError;

/// Maximum length of a reference-table name.
pub const MAX_NAME_LENGTH: usize = 150;

/// Maximum length of a free-text description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Largest amount a `NUMERIC(14,2)` fee column holds: 999,999,999,999.99.
pub const MAX_FEE_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// The simple lookup tables that share the `name / description / sort_order
/// / is_active` shape.
///
/// Table names used in SQL are only ever taken from [`Self::table`], never
/// from request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MasterDataKind {
    OrganizationTypes,
    EntityTypes,
    IndustrySegments,
    DomainGroups,
    RewardTypes,
    EngagementModels,
}

impl MasterDataKind {
    pub const ALL: [MasterDataKind; 6] = [
        MasterDataKind::OrganizationTypes,
        MasterDataKind::EntityTypes,
        MasterDataKind::IndustrySegments,
        MasterDataKind::DomainGroups,
        MasterDataKind::RewardTypes,
        MasterDataKind::EngagementModels,
    ];

    /// URL path segment, e.g. `organization-types`.
    pub fn slug(self) -> &'static str {
        match self {
            Self::OrganizationTypes => "organization-types",
            Self::EntityTypes => "entity-types",
            Self::IndustrySegments => "industry-segments",
            Self::DomainGroups => "domain-groups",
            Self::RewardTypes => "reward-types",
            Self::EngagementModels => "engagement-models",
        }
    }

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::OrganizationTypes => "organization_types",
            Self::EntityTypes => "entity_types",
            Self::IndustrySegments => "industry_segments",
            Self::DomainGroups => "domain_groups",
            Self::RewardTypes => "reward_types",
            Self::EngagementModels => "engagement_models",
        }
    }

    /// Singular entity label for error messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::OrganizationTypes => "OrganizationType",
            Self::EntityTypes => "EntityType",
            Self::IndustrySegments => "IndustrySegment",
            Self::DomainGroups => "DomainGroup",
            Self::RewardTypes => "RewardType",
            Self::EngagementModels => "EngagementModel",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }
}

/// Trim a reference-table name and check its length.
pub fn normalize_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Check an optional description's length, mapping blank text to `None`.
pub fn normalize_description(description: Option<&str>) -> Result<Option<String>, CoreError> {
    match description.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LENGTH => {
            Err(CoreError::Validation(format!(
                "description must be at most {MAX_DESCRIPTION_LENGTH} characters"
            )))
        }
        Some(text) => Ok(Some(text.to_string())),
    }
}

/// ISO 3166-1 alpha-2, returned upper case.
pub fn normalize_country_code(code: &str) -> Result<String, CoreError> {
    normalize_alpha_code(code, 2, "country code")
}

/// ISO 4217, returned upper case.
pub fn normalize_currency_code(code: &str) -> Result<String, CoreError> {
    normalize_alpha_code(code, 3, "currency code")
}

fn normalize_alpha_code(code: &str, len: usize, label: &str) -> Result<String, CoreError> {
    let trimmed = code.trim();
    if trimmed.len() != len || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::Validation(format!(
            "{label} must be {len} ASCII letters, got '{code}'"
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Reject negative fees and fees beyond `NUMERIC(14,2)` after rounding to cents.
pub fn validate_fee_amount(field: &str, value: Decimal) -> Result<(), CoreError> {
    if value.is_sign_negative() {
        return Err(CoreError::Validation(format!("{field} must not be negative")));
    }
    if value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero) > MAX_FEE_AMOUNT {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_FEE_AMOUNT}, got {value}"
        )));
    }
    Ok(())
}

/// Membership tiers must last at least a month and cannot cost less than nothing.
pub fn validate_membership_tier(
    annual_fee: Decimal,
    duration_months: i32,
) -> Result<(), CoreError> {
    validate_fee_amount("annual_fee", annual_fee)?;
    if duration_months <= 0 {
        return Err(CoreError::Validation(format!(
            "duration_months must be positive, got {duration_months}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn slugs_resolve_back_to_kinds() {
        for kind in MasterDataKind::ALL {
            assert_eq!(MasterDataKind::from_slug(kind.slug()), Some(kind));
            assert!(!kind.table().contains('-'));
        }
        assert_eq!(MasterDataKind::from_slug("countries"), None);
        assert_eq!(MasterDataKind::from_slug("users; DROP TABLE users"), None);
    }

    #[test]
    fn names_are_trimmed_and_bounded() {
        assert_eq!(normalize_name("  Startup ").unwrap(), "Startup");
        assert!(normalize_name("   ").is_err());
        assert!(normalize_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn blank_description_becomes_none() {
        assert_eq!(normalize_description(Some("  ")).unwrap(), None);
        assert_eq!(normalize_description(None).unwrap(), None);
        assert_eq!(
            normalize_description(Some(" Retail ")).unwrap().as_deref(),
            Some("Retail")
        );
    }

    #[test]
    fn codes_are_upper_cased() {
        assert_eq!(normalize_country_code("in").unwrap(), "IN");
        assert_eq!(normalize_currency_code(" eur ").unwrap(), "EUR");
        assert!(normalize_country_code("IND").is_err());
        assert!(normalize_currency_code("U$D").is_err());
    }

    #[test]
    fn membership_tier_bounds() {
        assert!(validate_membership_tier(dec!(0), 12).is_ok());
        assert!(validate_membership_tier(dec!(-1), 12).is_err());
        assert!(validate_membership_tier(dec!(100), 0).is_err());
        assert!(validate_membership_tier(dec!(999999999999.99), 12).is_ok());
        assert!(validate_membership_tier(dec!(1000000000000), 12).is_err());
    }

    #[test]
    fn fee_amounts_are_bounded_after_rounding_to_cents() {
        assert_eq!(MAX_FEE_AMOUNT, dec!(999999999999.99));
        assert!(validate_fee_amount("fee", dec!(999999999999.994)).is_ok());
        assert!(validate_fee_amount("fee", dec!(999999999999.995)).is_err());
    }
}
