//! The pricing catalog: every active template, rule and override, loaded
//! together for a fee calculation or for the admin overview.
//!
//! The three lists are fetched concurrently and independently. A failed
//! list is logged and recorded in [`PricingCatalog::errors`] while the other
//! lists still populate.

use serde::Serialize;
use sqlx::PgPool;
use seeker_core::error::CoreError;
use seeker_core::pricing::{self, calculate_pricing, FeeBreakdown, PricingInput};

use crate::models::pricing::{PricingOverride, PricingRule, PricingTemplate};
use crate::repositories::{PricingOverrideRepo, PricingRuleRepo, PricingTemplateRepo};

/// Which catalog list a load error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogList {
    Templates,
    Rules,
    Overrides,
}

impl CatalogList {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Templates => "templates",
            Self::Rules => "rules",
            Self::Overrides => "overrides",
        }
    }
}

/// A per-list load failure. The message is generic; details go to the log.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogLoadError {
    pub list: CatalogList,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PricingCatalog {
    pub templates: Vec<PricingTemplate>,
    pub rules: Vec<PricingRule>,
    /// Loaded for administration only; calculation never reads them.
    pub overrides: Vec<PricingOverride>,
    pub errors: Vec<CatalogLoadError>,
}

impl PricingCatalog {
    /// Load the active templates, rules and overrides concurrently.
    ///
    /// Never fails as a whole; check [`Self::errors`] or
    /// [`Self::ensure_calculable`].
    pub async fn load(pool: &PgPool) -> Self {
        let (templates, rules, overrides) = tokio::join!(
            PricingTemplateRepo::list(pool, false),
            PricingRuleRepo::list(pool, false),
            PricingOverrideRepo::list(pool, false),
        );

        let mut catalog = Self::default();
        catalog.templates = catalog.take_list(CatalogList::Templates, templates);
        catalog.rules = catalog.take_list(CatalogList::Rules, rules);
        catalog.overrides = catalog.take_list(CatalogList::Overrides, overrides);

        tracing::debug!(
            templates = catalog.templates.len(),
            rules = catalog.rules.len(),
            overrides = catalog.overrides.len(),
            failed_lists = catalog.errors.len(),
            "Pricing catalog loaded",
        );
        catalog
    }

    fn take_list<T>(&mut self, list: CatalogList, result: Result<Vec<T>, sqlx::Error>) -> Vec<T> {
        match result {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(list = list.as_str(), error = %e, "Failed to load pricing list");
                self.errors.push(CatalogLoadError {
                    list,
                    message: format!("Failed to load pricing {}", list.as_str()),
                });
                Vec::new()
            }
        }
    }

    /// Whether the list failed to load.
    pub fn failed(&self, list: CatalogList) -> bool {
        self.errors.iter().any(|e| e.list == list)
    }

    /// A calculation needs both templates and rules; overrides are optional.
    pub fn ensure_calculable(&self) -> Result<(), CoreError> {
        if self.failed(CatalogList::Templates) || self.failed(CatalogList::Rules) {
            return Err(CoreError::Internal(
                "Pricing configuration could not be loaded".into(),
            ));
        }
        Ok(())
    }

    /// Compute the fee breakdown for `input` from this catalog.
    ///
    /// Rules whose stored adjustment type cannot be interpreted are skipped
    /// with a warning. Returns `Ok(None)` when no active template matches.
    pub fn calculate(&self, input: &PricingInput) -> Result<Option<FeeBreakdown>, CoreError> {
        let templates: Vec<pricing::PricingTemplate> =
            self.templates.iter().map(pricing::PricingTemplate::from).collect();

        let rules: Vec<pricing::PricingRule> = self
            .rules
            .iter()
            .filter_map(|row| match pricing::PricingRule::try_from(row) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    tracing::warn!(
                        rule_id = row.id,
                        error = %e,
                        "Skipping uninterpretable pricing rule"
                    );
                    None
                }
            })
            .collect();

        calculate_pricing(&templates, &rules, input)
    }
}
