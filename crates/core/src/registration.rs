//! Solution Seeking Organization registration input.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

/// Minimum password length for self-registered accounts.
pub const MIN_PASSWORD_LENGTH: u64 = 12;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,50}$").expect("valid username regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+()\- ]{6,20}$").expect("valid phone regex"));

/// Body of `POST /registrations`: the organization profile plus the
/// credentials of its primary user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegistrationInput {
    #[validate(length(min = 2, max = 200))]
    pub organization_name: String,
    pub organization_type_id: DbId,
    pub entity_type_id: DbId,
    pub industry_segment_id: Option<DbId>,
    pub country_id: DbId,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub contact_first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub contact_last_name: String,
    #[validate(email)]
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub username: String,
    #[validate(length(min = MIN_PASSWORD_LENGTH))]
    pub password: String,
}

impl RegistrationInput {
    /// Trim free text, lower-case the e-mail and drop blank optionals.
    ///
    /// The password is left untouched.
    pub fn normalized(self) -> Self {
        Self {
            organization_name: self.organization_name.trim().to_string(),
            website: non_blank(self.website),
            contact_first_name: self.contact_first_name.trim().to_string(),
            contact_last_name: self.contact_last_name.trim().to_string(),
            contact_email: self.contact_email.trim().to_lowercase(),
            contact_phone: non_blank(self.contact_phone),
            username: self.username.trim().to_string(),
            ..self
        }
    }
}

/// Normalise and validate a registration.
pub fn validate_registration(input: RegistrationInput) -> Result<RegistrationInput, CoreError> {
    let input = input.normalized();
    input.validate()?;

    if !USERNAME_RE.is_match(&input.username) {
        return Err(CoreError::Validation(
            "username: 3-50 characters of letters, digits, '_', '.' or '-'".into(),
        ));
    }
    check_phone(input.contact_phone.as_deref())?;

    Ok(input)
}

/// Body of `PUT /organizations/me`. Absent fields are left unchanged.
///
/// The contact e-mail doubles as the login e-mail and is not editable here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileUpdateInput {
    #[validate(length(min = 2, max = 200))]
    pub organization_name: Option<String>,
    pub organization_type_id: Option<DbId>,
    pub entity_type_id: Option<DbId>,
    pub industry_segment_id: Option<DbId>,
    pub country_id: Option<DbId>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub contact_first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub contact_last_name: Option<String>,
    pub contact_phone: Option<String>,
}

/// Normalise and validate a profile update.
pub fn validate_profile_update(input: ProfileUpdateInput) -> Result<ProfileUpdateInput, CoreError> {
    let input = ProfileUpdateInput {
        organization_name: input.organization_name.map(|v| v.trim().to_string()),
        website: non_blank(input.website),
        contact_first_name: input.contact_first_name.map(|v| v.trim().to_string()),
        contact_last_name: input.contact_last_name.map(|v| v.trim().to_string()),
        contact_phone: non_blank(input.contact_phone),
        ..input
    };
    input.validate()?;
    check_phone(input.contact_phone.as_deref())?;
    Ok(input)
}

fn check_phone(phone: Option<&str>) -> Result<(), CoreError> {
    match phone {
        Some(phone) if !PHONE_RE.is_match(phone) => Err(CoreError::Validation(
            "contact_phone: 6-20 characters of digits, spaces, '+', '-', '(' or ')'".into(),
        )),
        _ => Ok(()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
