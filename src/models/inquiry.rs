use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::inquiry::{Inquiry as DomainInquiry, NewInquiry as DomainNewInquiry};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::inquiries)]
pub struct Inquiry {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::inquiries)]
pub struct NewInquiry<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
}

impl From<Inquiry> for DomainInquiry {
    fn from(value: Inquiry) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            message: value.message,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewInquiry> for NewInquiry<'a> {
    fn from(value: &'a DomainNewInquiry) -> Self {
        Self {
            name: value.name.as_str(),
            email: value.email.as_str(),
            message: value.message.as_str(),
        }
    }
}
