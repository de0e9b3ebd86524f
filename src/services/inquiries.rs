use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::inquiry::Inquiry;
use crate::forms::contact::ContactForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated, Pagination};
use crate::repository::{InquiryReader, InquiryWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Stores a contact-form submission.
pub fn submit_inquiry<R>(repo: &R, form: ContactForm) -> ServiceResult<Inquiry>
where
    R: InquiryWriter + ?Sized,
{
    let new_inquiry = form
        .into_new_inquiry()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let inquiry = repo.create_inquiry(&new_inquiry)?;
    log::info!("Stored inquiry {} from {}", inquiry.id, inquiry.email);
    Ok(inquiry)
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// Contact submissions for the back-office, newest first.
pub fn load_inquiries_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: PageQuery,
) -> ServiceResult<Paginated<Inquiry>>
where
    R: InquiryReader + ?Sized,
{
    ensure_admin(user)?;

    let page = query.page.unwrap_or(1).max(1);
    let (total, inquiries) = repo.list_inquiries(Pagination {
        page,
        per_page: DEFAULT_ITEMS_PER_PAGE,
    })?;

    Ok(Paginated::from_total(
        inquiries,
        page,
        total,
        DEFAULT_ITEMS_PER_PAGE,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::{MockInquiryReader, MockInquiryWriter};
    use crate::services::test_support::{admin, customer, fixed_datetime};

    #[test]
    fn blank_message_is_not_stored() {
        let mut repo = MockInquiryWriter::new();
        repo.expect_create_inquiry().never();

        let form = ContactForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            message: String::new(),
        };

        assert!(matches!(
            submit_inquiry(&repo, form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn valid_inquiry_is_stored() {
        let mut repo = MockInquiryWriter::new();
        repo.expect_create_inquiry()
            .times(1)
            .withf(|new_inquiry| new_inquiry.email == "jane@example.com")
            .returning(|new_inquiry| {
                Ok(Inquiry {
                    id: 3,
                    name: new_inquiry.name.clone(),
                    email: new_inquiry.email.clone(),
                    message: new_inquiry.message.clone(),
                    created_at: fixed_datetime(),
                })
            });

        let form = ContactForm {
            name: "Jane".to_string(),
            email: "Jane@Example.com".to_string(),
            message: "Hello".to_string(),
        };

        assert_eq!(submit_inquiry(&repo, form).unwrap().id, 3);
    }

    #[test]
    fn inquiries_page_is_admin_only() {
        let mut repo = MockInquiryReader::new();
        repo.expect_list_inquiries().never();

        let result = load_inquiries_page(&repo, &customer(), PageQuery::default());
        assert!(matches!(result, Err(ServiceError::Unauthorized)));

        let mut repo = MockInquiryReader::new();
        repo.expect_list_inquiries()
            .withf(|pagination| pagination.page == 2)
            .returning(|_| Ok((25, Vec::new())));

        let page = load_inquiries_page(&repo, &admin(), PageQuery { page: Some(2) }).unwrap();
        assert_eq!(page.total_pages, 2);
    }
}
