use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Message submitted through the contact form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl NewInquiry {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into().to_lowercase(),
            message: message.into(),
        }
    }
}
