//! Back-office dashboard and customer list.

use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::report::StoreTotals;
use crate::domain::user::{User, UserListQuery};
use crate::forms::non_empty;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ReportReader, UserReader};
use crate::services::{ServiceResult, ensure_admin};

pub fn load_dashboard<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<StoreTotals>
where
    R: ReportReader + ?Sized,
{
    ensure_admin(user)?;
    Ok(repo.store_totals()?)
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
}

pub struct CustomersPageData {
    pub customers: Paginated<User>,
    pub search: Option<String>,
}

/// Registered accounts, newest first, optionally filtered by username or email.
pub fn load_customers_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: CustomersQuery,
) -> ServiceResult<CustomersPageData>
where
    R: UserReader + ?Sized,
{
    ensure_admin(user)?;

    let search = non_empty(query.search.as_deref());
    let page = query.page.unwrap_or(1).max(1);

    let mut list_query = UserListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = &search {
        list_query = list_query.search(term.clone());
    }

    let (total, users) = repo.list_users(list_query)?;

    Ok(CustomersPageData {
        customers: Paginated::from_total(users, page, total, DEFAULT_ITEMS_PER_PAGE),
        search,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::{MockReportReader, MockUserReader};
    use crate::services::ServiceError;
    use crate::services::test_support::{admin, customer};

    #[test]
    fn dashboard_rejects_customers() {
        let mut repo = MockReportReader::new();
        repo.expect_store_totals().never();

        assert!(matches!(
            load_dashboard(&repo, &customer()),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn dashboard_returns_totals() {
        let mut repo = MockReportReader::new();
        repo.expect_store_totals().returning(|| {
            Ok(StoreTotals {
                users: 3,
                products: 10,
                ..StoreTotals::default()
            })
        });

        let totals = load_dashboard(&repo, &admin()).unwrap();
        assert_eq!(totals.products, 10);
    }

    #[test]
    fn customer_search_is_trimmed_and_forwarded() {
        let mut repo = MockUserReader::new();
        repo.expect_list_users()
            .withf(|query| query.search.as_deref() == Some("jane"))
            .returning(|_| Ok((0, Vec::new())));

        let query = CustomersQuery {
            search: Some("  jane ".to_string()),
            page: None,
        };
        let data = load_customers_page(&repo, &admin(), query).unwrap();

        assert_eq!(data.search.as_deref(), Some("jane"));
        assert!(data.customers.items.is_empty());
    }

    #[test]
    fn blank_search_lists_everyone() {
        let mut repo = MockUserReader::new();
        repo.expect_list_users()
            .withf(|query| query.search.is_none())
            .returning(|_| Ok((0, Vec::new())));

        let query = CustomersQuery {
            search: Some("   ".to_string()),
            page: Some(1),
        };
        assert!(load_customers_page(&repo, &admin(), query).is_ok());
    }
}
