#![forbid(unsafe_code)]

//! Contact form state.
//!
//! The form collects a name, an email address and a message. Submission is
//! handed to the host as a [`ContactSubmission`]; delivering it to the
//! endpoint is the host's job.

use std::fmt;

use serde::Serialize;

/// A field of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [Self::Name, Self::Email, Self::Message];

    /// Form input name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Blank after trimming.
    Missing,
    /// Not shaped like an email address.
    InvalidEmail,
}

/// Validation failure for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: ContactField,
    pub kind: FieldErrorKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FieldErrorKind::Missing => write!(f, "{} is required", self.field),
            FieldErrorKind::InvalidEmail => {
                write!(f, "{} is not a valid email address", self.field)
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Validated form contents, ready to post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    #[serde(skip)]
    pub endpoint: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    /// JSON body for the endpoint (the endpoint itself is not included).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    fn slot(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        ContactField::ALL
            .iter()
            .all(|&field| self.field(field).is_empty())
    }

    /// Every problem with the current contents, in field order.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        for field in ContactField::ALL {
            let value = self.field(field).trim();
            if value.is_empty() {
                errors.push(FieldError {
                    field,
                    kind: FieldErrorKind::Missing,
                });
            } else if field == ContactField::Email && !is_email_shaped(value) {
                errors.push(FieldError {
                    field,
                    kind: FieldErrorKind::InvalidEmail,
                });
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate, snapshot and clear the form.
    ///
    /// On failure the contents are kept so the visitor can correct them.
    pub fn submit(&mut self, endpoint: &str) -> Result<ContactSubmission, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            tracing::debug!(errors = errors.len(), "contact form rejected");
            return Err(errors);
        }
        let submitted = std::mem::take(self);
        tracing::info!(endpoint, "contact form submitted");
        Ok(ContactSubmission {
            endpoint: endpoint.to_owned(),
            name: submitted.name.trim().to_owned(),
            email: submitted.email.trim().to_owned(),
            message: submitted.message.trim().to_owned(),
        })
    }
}

fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://formspree.io/f/test";

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_field(ContactField::Name, "Ada");
        form.set_field(ContactField::Email, "ada@example.com");
        form.set_field(ContactField::Message, "Hello!");
        form
    }

    #[test]
    fn empty_form_reports_all_missing() {
        let errors = ContactForm::new().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.kind == FieldErrorKind::Missing));
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let mut form = filled();
        form.set_field(ContactField::Message, "   ");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError {
                field: ContactField::Message,
                kind: FieldErrorKind::Missing
            }]
        );
    }

    #[test]
    fn email_shapes() {
        assert!(is_email_shaped("a@b.co"));
        assert!(!is_email_shaped("a@b"));
        assert!(!is_email_shaped("@b.co"));
        assert!(!is_email_shaped("a@@b.co"));
        assert!(!is_email_shaped("a b@c.co"));
        assert!(!is_email_shaped("a@.co"));
    }

    #[test]
    fn rejected_submit_keeps_contents() {
        let mut form = filled();
        form.set_field(ContactField::Email, "not-an-email");
        let errors = form.submit(ENDPOINT).unwrap_err();
        assert_eq!(errors[0].to_string(), "email is not a valid email address");
        assert_eq!(form.field(ContactField::Name), "Ada");
    }

    #[test]
    fn submit_snapshots_and_resets() {
        let mut form = filled();
        let submission = form.submit(ENDPOINT).unwrap();
        assert_eq!(submission.endpoint, ENDPOINT);
        assert_eq!(submission.email, "ada@example.com");
        assert!(form.is_empty());
    }

    #[test]
    fn submission_json_omits_endpoint() {
        let submission = filled().submit(ENDPOINT).unwrap();
        let json = submission.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"name":"Ada","email":"ada@example.com","message":"Hello!"}"#
        );
    }
}
