use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::forms::categories::CategoryForm;
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Loads every category for the back-office list.
pub fn load_categories<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    ensure_admin(user)?;
    Ok(repo.list_categories()?)
}

/// Loads a single category for the edit page.
pub fn get_category<R>(repo: &R, user: &AuthenticatedUser, category_id: i32) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    ensure_admin(user)?;
    repo.get_category_by_id(category_id)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a new category.
pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    ensure_admin(user)?;

    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let category = repo.create_category(&new_category)?;
    log::info!("Category {} created: {}", category.id, category.label());
    Ok(category)
}

/// Renames a category or changes its subcategory.
pub fn modify_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: i32,
    form: CategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    ensure_admin(user)?;

    let update = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    Ok(repo.update_category(category_id, &update)?)
}

/// Deletes a category. Its products stay in the catalog without a category.
pub fn remove_category<R>(repo: &R, user: &AuthenticatedUser, category_id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    ensure_admin(user)?;

    repo.delete_category(category_id)?;
    log::info!("Category {category_id} deleted by user {}", user.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::{MockCategoryReader, MockCategoryWriter};
    use crate::services::test_support::{admin, customer, fixed_datetime};

    fn form(name: &str, subcategory: Option<&str>) -> CategoryForm {
        CategoryForm {
            name: name.to_string(),
            subcategory: subcategory.map(str::to_string),
        }
    }

    #[test]
    fn customers_cannot_manage_categories() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_create_category().never();
        repo.expect_delete_category().never();

        assert!(matches!(
            create_category(&repo, &customer(), form("Rings", None)),
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            remove_category(&repo, &customer(), 1),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn create_category_stores_sanitized_values() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_create_category()
            .withf(|new_category| {
                new_category.name == "Rings" && new_category.subcategory.as_deref() == Some("Gold")
            })
            .returning(|new_category| {
                Ok(Category {
                    id: 4,
                    name: new_category.name.clone(),
                    subcategory: new_category.subcategory.clone(),
                    created_at: fixed_datetime(),
                })
            });

        let category = create_category(&repo, &admin(), form("  Rings ", Some(" Gold "))).unwrap();

        assert_eq!(category.label(), "Rings / Gold");
    }

    #[test]
    fn blank_name_is_a_form_error() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_update_category().never();

        assert!(matches!(
            modify_category(&repo, &admin(), 1, form("   ", None)),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn deleting_unknown_category_is_not_found() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_delete_category()
            .returning(|_| Err(RepositoryError::NotFound));

        assert!(matches!(
            remove_category(&repo, &admin(), 42),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn missing_category_is_not_found() {
        let mut repo = MockCategoryReader::new();
        repo.expect_get_category_by_id().returning(|_| Ok(None));

        assert!(matches!(
            get_category(&repo, &admin(), 9),
            Err(ServiceError::NotFound)
        ));
    }
}
