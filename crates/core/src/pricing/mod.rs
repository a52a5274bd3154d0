//! Engagement-model pricing.
//!
//! A [`PricingTemplate`] carries the base fees for one engagement model.
//! [`PricingRule`]s adjust those fees when their single condition matches
//! the organization being priced. [`calculate_pricing`] layers the rules
//! over the template in ascending priority order.

mod calculator;
mod validation;

pub use calculator::{apply_adjustment, calculate_pricing};
pub use validation::{
    validate_override_definition, validate_rule_definition, validate_template_definition,
    RuleDefinition, TemplateDefinition,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::membership::MembershipStatus;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sentinel target field addressing every numeric fee field at once.
pub const ALL_FEES_TARGET: &str = "all_fees";

/// Rule type that, combined with [`ALL_FEES_TARGET`], discounts every fee.
pub const MEMBER_DISCOUNT_RULE: &str = "member_discount";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Commercial shape of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    Marketplace,
    Paas,
}

impl TemplateType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Marketplace => "marketplace",
            Self::Paas => "paas",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "marketplace" => Some(Self::Marketplace),
            "paas" => Some(Self::Paas),
            _ => None,
        }
    }
}

/// One of the four numeric fields of a [`FeeBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeField {
    PlatformFeePercentage,
    QuarterlyFee,
    HalfYearlyFee,
    AnnualFee,
}

impl FeeField {
    /// Every fee field, in display order.
    pub const ALL: [FeeField; 4] = [
        FeeField::PlatformFeePercentage,
        FeeField::QuarterlyFee,
        FeeField::HalfYearlyFee,
        FeeField::AnnualFee,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlatformFeePercentage => "platform_fee_percentage",
            Self::QuarterlyFee => "quarterly_fee",
            Self::HalfYearlyFee => "half_yearly_fee",
            Self::AnnualFee => "annual_fee",
        }
    }

    /// Parse a rule's `target_field`. Accepts the snake-case column names
    /// and the camel-case names admins see in the pricing screens.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "platform_fee_percentage" | "platformFeePercentage" => {
                Some(Self::PlatformFeePercentage)
            }
            "quarterly_fee" | "quarterlyFee" => Some(Self::QuarterlyFee),
            "half_yearly_fee" | "halfYearlyFee" => Some(Self::HalfYearlyFee),
            "annual_fee" | "annualFee" => Some(Self::AnnualFee),
            _ => None,
        }
    }
}

/// How a rule changes the targeted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    /// `value` is a discount percentage: `old * (1 - value / 100)`.
    Percentage,
    /// `old + value`.
    FixedAmount,
    /// `old * value`.
    Multiplier,
}

impl AdjustmentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::FixedAmount => "fixed_amount",
            Self::Multiplier => "multiplier",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "percentage" => Some(Self::Percentage),
            "fixed_amount" => Some(Self::FixedAmount),
            "multiplier" => Some(Self::Multiplier),
            _ => None,
        }
    }
}

impl TryFrom<&str> for AdjustmentType {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
            .ok_or_else(|| CoreError::Validation(format!("Unknown adjustment type '{value}'")))
    }
}

/// The input axis a rule is conditioned on.
///
/// A rule matches on exactly one axis. Condition types stored in the
/// database that this build does not know are kept as [`Self::Other`] and
/// never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionType {
    OrganizationType,
    MembershipStatus,
    Country,
    Other(String),
}

impl ConditionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::OrganizationType => "organization_type",
            Self::MembershipStatus => "membership_status",
            Self::Country => "country",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for ConditionType {
    fn from(value: &str) -> Self {
        match value {
            "organization_type" => Self::OrganizationType,
            "membership_status" => Self::MembershipStatus,
            "country" => Self::Country,
            other => Self::Other(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain records
// ---------------------------------------------------------------------------

/// Base fee configuration for one engagement model.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTemplate {
    pub id: DbId,
    pub template_name: String,
    pub engagement_model: String,
    pub template_type: String,
    pub base_platform_fee_percentage: Decimal,
    pub base_quarterly_fee: Decimal,
    pub base_half_yearly_fee: Decimal,
    pub base_annual_fee: Decimal,
    pub currency_code: String,
    pub internal_pricing: serde_json::Value,
    pub is_active: bool,
}

/// A conditional adjustment of one (or, for member discounts, every) fee field.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRule {
    pub id: DbId,
    pub rule_name: String,
    pub rule_type: String,
    pub target_field: String,
    pub condition_type: ConditionType,
    pub condition_value: String,
    pub adjustment_type: AdjustmentType,
    pub adjustment_value: Decimal,
    pub priority: i32,
    pub is_active: bool,
}

impl PricingRule {
    /// Whether this rule's condition holds for `input`.
    ///
    /// Does not look at `is_active`.
    pub fn matches(&self, input: &PricingInput) -> bool {
        match &self.condition_type {
            ConditionType::OrganizationType => self.condition_value == input.organization_type,
            ConditionType::MembershipStatus => {
                self.condition_value == input.membership_status.as_str()
            }
            ConditionType::Country => input
                .country
                .as_deref()
                .is_some_and(|country| country == self.condition_value),
            ConditionType::Other(_) => false,
        }
    }

    /// True for the `member_discount` + `all_fees` combination that
    /// discounts every fee field independently.
    pub fn is_blanket_member_discount(&self) -> bool {
        self.rule_type == MEMBER_DISCOUNT_RULE && self.target_field == ALL_FEES_TARGET
    }
}

/// Who is being priced, for which engagement model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInput {
    pub engagement_model: String,
    pub organization_type: String,
    pub membership_status: MembershipStatus,
    #[serde(default)]
    pub country: Option<String>,
}

/// A rule that changed the breakdown, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRule {
    pub rule_id: DbId,
    pub rule_name: String,
    pub adjustment_type: AdjustmentType,
    pub fields: Vec<FeeField>,
}

/// Final fees for an organization under one engagement model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeBreakdown {
    pub template_id: DbId,
    pub template_name: String,
    pub engagement_model: String,
    pub template_type: String,
    pub platform_fee_percentage: Decimal,
    pub quarterly_fee: Decimal,
    pub half_yearly_fee: Decimal,
    pub annual_fee: Decimal,
    pub currency_code: String,
    pub internal_pricing: serde_json::Value,
    pub applied_rules: Vec<AppliedRule>,
}

impl FeeBreakdown {
    /// Start a breakdown from a template's base values.
    pub fn from_template(template: &PricingTemplate) -> Self {
        Self {
            template_id: template.id,
            template_name: template.template_name.clone(),
            engagement_model: template.engagement_model.clone(),
            template_type: template.template_type.clone(),
            platform_fee_percentage: template.base_platform_fee_percentage,
            quarterly_fee: template.base_quarterly_fee,
            half_yearly_fee: template.base_half_yearly_fee,
            annual_fee: template.base_annual_fee,
            currency_code: template.currency_code.clone(),
            internal_pricing: template.internal_pricing.clone(),
            applied_rules: Vec::new(),
        }
    }

    pub fn get(&self, field: FeeField) -> Decimal {
        match field {
            FeeField::PlatformFeePercentage => self.platform_fee_percentage,
            FeeField::QuarterlyFee => self.quarterly_fee,
            FeeField::HalfYearlyFee => self.half_yearly_fee,
            FeeField::AnnualFee => self.annual_fee,
        }
    }

    fn get_mut(&mut self, field: FeeField) -> &mut Decimal {
        match field {
            FeeField::PlatformFeePercentage => &mut self.platform_fee_percentage,
            FeeField::QuarterlyFee => &mut self.quarterly_fee,
            FeeField::HalfYearlyFee => &mut self.half_yearly_fee,
            FeeField::AnnualFee => &mut self.annual_fee,
        }
    }
}
