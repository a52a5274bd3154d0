//! Membership status and tier-duration arithmetic.

use std::fmt;

use chrono::Months;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Whether an organization holds a paid annual membership.
///
/// Serialised with the labels used throughout the pricing rules:
/// `"Member"` and `"Non-Member"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MembershipStatus {
    #[serde(rename = "Member")]
    Member,
    #[default]
    #[serde(rename = "Non-Member")]
    NonMember,
}

impl MembershipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::NonMember => "Non-Member",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Member" => Some(Self::Member),
            "Non-Member" => Some(Self::NonMember),
            _ => None,
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status to price with: a stored `Member` whose expiry has passed is
/// treated as `Non-Member`.
pub fn effective_membership_status(
    stored: MembershipStatus,
    expires_at: Option<Timestamp>,
    now: Timestamp,
) -> MembershipStatus {
    match (stored, expires_at) {
        (MembershipStatus::Member, Some(expiry)) if expiry <= now => MembershipStatus::NonMember,
        (status, _) => status,
    }
}

/// Expiry of a membership started at `started_at` lasting `duration_months`
/// calendar months (end-of-month dates clamp, e.g. Jan 31 + 1 → Feb 28/29).
pub fn membership_expiry(
    started_at: Timestamp,
    duration_months: i32,
) -> Result<Timestamp, CoreError> {
    let months = u32::try_from(duration_months)
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "duration_months must be positive, got {duration_months}"
            ))
        })?;

    started_at
        .checked_add_months(Months::new(months))
        .ok_or_else(|| CoreError::Internal("Membership expiry is out of range".into()))
}
