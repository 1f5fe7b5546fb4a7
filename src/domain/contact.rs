//! Validation of submissions coming from the public site.

use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    events::{check_len, non_blank},
};

pub const SHORT_TEXT_MAX_CHARS: usize = 255;
pub const QUESTION_MAX_CHARS: usize = 5000;

/// Contact form entry ready to be stored as an inbox message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: Option<&str>,
        subject: &str,
        message: &str,
    ) -> Result<Self, DomainError> {
        let first_name = required("first_name", first_name, Some(SHORT_TEXT_MAX_CHARS))?;
        let last_name = required("last_name", last_name, Some(SHORT_TEXT_MAX_CHARS))?;
        let email = validate_email("email", email)?;
        let phone = non_blank(phone.map(str::to_string));
        if let Some(phone) = &phone {
            check_len("phone", phone, SHORT_TEXT_MAX_CHARS)?;
        }
        let subject = required("subject", subject, Some(SHORT_TEXT_MAX_CHARS))?;
        let message = required("message", message, None)?;

        Ok(Self {
            name: format!("{first_name} {last_name}"),
            email,
            phone,
            subject,
            message,
        })
    }
}

/// Question submitted to the fatwa desk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatwaQuestion {
    pub name: Option<String>,
    pub email: Option<String>,
    pub category_id: Option<Uuid>,
    pub question_text: String,
}

impl FatwaQuestion {
    pub fn validate(
        name: Option<&str>,
        email: Option<&str>,
        category_id: Option<Uuid>,
        question_text: &str,
    ) -> Result<Self, DomainError> {
        let question_text = required("question_text", question_text, Some(QUESTION_MAX_CHARS))?;
        let name = non_blank(name.map(str::to_string));
        if let Some(name) = &name {
            check_len("name", name, SHORT_TEXT_MAX_CHARS)?;
        }
        let email = match non_blank(email.map(str::to_string)) {
            Some(email) => Some(validate_email("email", &email)?),
            None => None,
        };
        Ok(Self {
            name,
            email,
            category_id,
            question_text,
        })
    }
}

fn required(field: &'static str, value: &str, max: Option<usize>) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(field, "is required"));
    }
    if let Some(max) = max {
        check_len(field, value, max)?;
    }
    Ok(value.to_string())
}

/// One `@` separating a non-empty local part from a non-empty domain.
fn validate_email(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = required(field, value, Some(SHORT_TEXT_MAX_CHARS))?;
    let mut parts = value.split('@');
    let well_formed = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None)
            if !local.is_empty() && !domain.is_empty() && !value.contains(char::is_whitespace)
    );
    if !well_formed {
        return Err(DomainError::validation(field, "must be a valid email address"));
    }
    Ok(value)
}
