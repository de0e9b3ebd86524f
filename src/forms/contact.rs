use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::inquiry::NewInquiry;
use crate::forms::{invalid_fields, sanitize_inline_text, sanitize_multiline_text};

const NAME_MAX_LEN: u64 = 100;
const MESSAGE_MAX_LEN: u64 = 5000;

pub type ContactFormResult<T> = Result<T, ContactFormError>;

#[derive(Debug, Error)]
pub enum ContactFormError {
    #[error("Please check the following fields: {}", invalid_fields(.0))]
    Validation(#[from] ValidationErrors),
    #[error("Name, email and message are required.")]
    MissingField,
}

/// Message submitted through the public contact page.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = MESSAGE_MAX_LEN))]
    pub message: String,
}

impl ContactForm {
    pub fn into_new_inquiry(self) -> ContactFormResult<NewInquiry> {
        let form = ContactForm {
            email: self.email.trim().to_string(),
            ..self
        };
        form.validate()?;

        let name = sanitize_inline_text(&form.name);
        let message = sanitize_multiline_text(&form.message);
        if name.is_empty() || message.is_empty() {
            return Err(ContactFormError::MissingField);
        }

        Ok(NewInquiry::new(name, form.email, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_form_builds_inquiry() {
        let form = ContactForm {
            name: " Jane ".to_string(),
            email: " Jane@Example.com ".to_string(),
            message: "\nWhere is my parcel?\n".to_string(),
        };

        let inquiry = form.into_new_inquiry().unwrap();

        assert_eq!(inquiry.name, "Jane");
        assert_eq!(inquiry.email, "jane@example.com");
        assert_eq!(inquiry.message, "Where is my parcel?");
    }

    #[test]
    fn contact_form_rejects_whitespace_message() {
        let form = ContactForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            message: " \n ".to_string(),
        };

        assert!(matches!(
            form.into_new_inquiry(),
            Err(ContactFormError::MissingField)
        ));
    }
}
