//! Back-office product management.

use std::fs;
use std::path::Path;

use actix_multipart::form::tempfile::TempFile;
use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::domain::product::{Product, ProductListQuery};
use crate::forms::products::{ImageSource, ProductForm, ProductInput, UPLOAD_URL_PREFIX};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{CategoryReader, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Query parameters accepted by the admin products page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub page: Option<usize>,
}

/// Data required to render the admin products list.
pub struct ProductsPageData {
    pub products: Paginated<Product>,
    /// Used to label the category column.
    pub categories: Vec<Category>,
}

pub fn load_products_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ProductsQuery,
) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    ensure_admin(user)?;

    let page = query.page.unwrap_or(1).max(1);
    let (total, products) =
        repo.list_products(ProductListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE))?;
    let categories = repo.list_categories()?;

    Ok(ProductsPageData {
        products: Paginated::from_total(products, page, total, DEFAULT_ITEMS_PER_PAGE),
        categories,
    })
}

/// Data for the create and edit forms.
pub struct ProductFormData {
    /// `None` on the create page.
    pub product: Option<Product>,
    pub categories: Vec<Category>,
}

pub fn load_product_form<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: Option<i32>,
) -> ServiceResult<ProductFormData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    ensure_admin(user)?;

    let product = match product_id {
        Some(id) => Some(repo.get_product_by_id(id)?.ok_or(ServiceError::NotFound)?),
        None => None,
    };

    Ok(ProductFormData {
        product,
        categories: repo.list_categories()?,
    })
}

/// Creates a product, storing the uploaded image under `upload_dir` when present.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProductForm,
    upload_dir: &Path,
) -> ServiceResult<Product>
where
    R: ProductWriter + CategoryReader + ?Sized,
{
    ensure_admin(user)?;

    let mut input = validated_input(repo, form)?;
    let image = resolve_image(&mut input, upload_dir)?;
    let new_product = input.into_new_product(image);

    let product = repo.create_product(&new_product)?;
    log::info!("Product {} created by user {}", product.id, user.id);
    Ok(product)
}

/// Replaces the editable fields of a product. An empty image field keeps the current image.
pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: ProductForm,
    upload_dir: &Path,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + CategoryReader + ?Sized,
{
    ensure_admin(user)?;

    let product = repo
        .get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;

    let mut input = validated_input(repo, form)?;
    let image = resolve_image(&mut input, upload_dir)?;
    let update = input.into_update_product(&product, image);

    Ok(repo.update_product(product_id, &update)?)
}

pub fn delete_product<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_admin(user)?;

    repo.delete_product(product_id)?;
    log::info!("Product {product_id} deleted by user {}", user.id);
    Ok(())
}

fn validated_input<R>(repo: &R, form: ProductForm) -> ServiceResult<ProductInput>
where
    R: CategoryReader + ?Sized,
{
    let input = form
        .into_input()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if let Some(category_id) = input.category_id {
        if repo.get_category_by_id(category_id)?.is_none() {
            return Err(ServiceError::Form(
                "Selected category does not exist.".to_string(),
            ));
        }
    }

    Ok(input)
}

/// Turn the image source into the URL to store. `None` means keep the current one.
fn resolve_image(input: &mut ProductInput, upload_dir: &Path) -> ServiceResult<Option<String>> {
    match std::mem::replace(&mut input.image, ImageSource::Keep) {
        ImageSource::Keep => Ok(None),
        ImageSource::Url(url) => Ok(Some(url)),
        ImageSource::Upload { file_name, file } => {
            store_upload(upload_dir, &file_name, &file).map(Some)
        }
    }
}

/// Copy an uploaded file into `upload_dir` under a timestamped name and
/// return the public URL it is served from.
pub fn store_upload(upload_dir: &Path, file_name: &str, file: &TempFile) -> ServiceResult<String> {
    fs::create_dir_all(upload_dir).map_err(|err| {
        log::error!("Failed to create upload dir {}: {err}", upload_dir.display());
        ServiceError::Internal
    })?;

    let stored_name = format!(
        "{}_{}",
        chrono::Local::now().format("%Y%m%d%H%M%S%3f"),
        file_name
    );
    let destination = upload_dir.join(&stored_name);

    fs::copy(file.file.path(), &destination).map_err(|err| {
        log::error!("Failed to store upload {}: {err}", destination.display());
        ServiceError::Internal
    })?;

    Ok(format!("{UPLOAD_URL_PREFIX}/{stored_name}"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use actix_multipart::form::text::Text;

    use super::*;
    use crate::repository::mock::{MockProductWriter, MockStore};
    use crate::services::test_support::{admin, customer, fixed_datetime, product};

    fn text(value: &str) -> Option<Text<String>> {
        Some(Text(value.to_string()))
    }

    fn form(name: &str, price: &str, stock: &str) -> ProductForm {
        ProductForm {
            name: text(name),
            price: text(price),
            stock: text(stock),
            description: None,
            category_id: None,
            image: None,
            image_file: None,
        }
    }

    fn upload(name: &str, contents: &[u8]) -> TempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        TempFile {
            file,
            content_type: None,
            file_name: Some(name.to_string()),
            size: contents.len(),
        }
    }

    #[test]
    fn customers_cannot_create_products() {
        let mut repo = MockStore::new();
        repo.expect_create_product().never();
        let dir = tempfile::tempdir().unwrap();

        let result = create_product(&repo, &customer(), form("Mug", "4", "1"), dir.path());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut repo = MockStore::new();
        repo.expect_get_category_by_id().returning(|_| Ok(None));
        repo.expect_create_product().never();
        let dir = tempfile::tempdir().unwrap();

        let mut form = form("Mug", "4", "1");
        form.category_id = text("99");
        let result = create_product(&repo, &admin(), form, dir.path());

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn uploaded_image_is_stored_and_linked() {
        let mut repo = MockStore::new();
        repo.expect_create_product()
            .withf(|new_product| {
                new_product.price_cents == 1999
                    && new_product
                        .image
                        .as_deref()
                        .is_some_and(|url| url.starts_with("/assets/uploads/") && url.ends_with("_mug.png"))
            })
            .returning(|new_product| {
                let mut stored = product(5, &new_product.name, new_product.price_cents, new_product.stock);
                stored.image = new_product.image.clone();
                Ok(stored)
            });
        let dir = tempfile::tempdir().unwrap();

        let mut form = form("Mug", "19.99", "3");
        form.image_file = Some(upload("mug.png", b"not really a png"));
        let created = create_product(&repo, &admin(), form, dir.path()).unwrap();

        let url = created.image.unwrap();
        let stored_name = url.trim_start_matches("/assets/uploads/");
        let stored = std::fs::read(dir.path().join(stored_name)).unwrap();
        assert_eq!(stored, b"not really a png");
    }

    #[test]
    fn edit_without_image_keeps_existing_one() {
        let mut repo = MockStore::new();
        repo.expect_get_product_by_id().returning(|id| {
            let mut existing = product(id, "Mug", 400, 2);
            existing.image = Some("/assets/uploads/old.png".to_string());
            Ok(Some(existing))
        });
        repo.expect_update_product()
            .withf(|id, update| {
                *id == 5
                    && update.image.as_deref() == Some("/assets/uploads/old.png")
                    && update.stock == 8
            })
            .returning(|id, update| {
                Ok(Product {
                    id,
                    name: update.name.clone(),
                    description: update.description.clone(),
                    price_cents: update.price_cents,
                    stock: update.stock,
                    image: update.image.clone(),
                    category_id: update.category_id,
                    created_at: fixed_datetime(),
                    updated_at: update.updated_at,
                })
            });
        let dir = tempfile::tempdir().unwrap();

        let updated = update_product(&repo, &admin(), 5, form("Mug", "4", "8"), dir.path()).unwrap();

        assert_eq!(updated.stock, 8);
    }

    #[test]
    fn editing_missing_product_is_not_found() {
        let mut repo = MockStore::new();
        repo.expect_get_product_by_id().returning(|_| Ok(None));
        let dir = tempfile::tempdir().unwrap();

        let result = update_product(&repo, &admin(), 5, form("Mug", "4", "8"), dir.path());

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn delete_requires_admin() {
        let mut repo = MockProductWriter::new();
        repo.expect_delete_product().never();

        assert!(matches!(
            delete_product(&repo, &customer(), 1),
            Err(ServiceError::Unauthorized)
        ));
    }
}
