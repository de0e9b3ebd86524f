use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use thiserror::Error;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::forms::{non_empty, sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 200;

/// Highest accepted price, 1 000 000.00.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Image extensions accepted by the upload field.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Public URL prefix under which uploaded images are served.
pub const UPLOAD_URL_PREFIX: &str = "/assets/uploads";

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing the product form.
#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Name, price, and stock are required")]
    MissingRequired,
    #[error("Product name is too long.")]
    NameTooLong,
    #[error("Invalid price `{value}`.")]
    InvalidPrice { value: String },
    #[error("Invalid stock `{value}`.")]
    InvalidStock { value: String },
    #[error("Invalid category `{value}`.")]
    InvalidCategory { value: String },
    #[error("Unsupported image `{file_name}`; allowed types are png, jpg, jpeg, gif.")]
    UnsupportedImage { file_name: String },
}

/// Multipart payload posted by the admin product create/edit page.
#[derive(Debug, MultipartForm)]
pub struct ProductForm {
    pub name: Option<Text<String>>,
    /// Decimal price such as `12.50`.
    pub price: Option<Text<String>>,
    pub stock: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub category_id: Option<Text<String>>,
    /// Image URL typed in by the admin.
    pub image: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    pub image_file: Option<TempFile>,
}

/// Where the product image comes from after the form is processed.
#[derive(Debug)]
pub enum ImageSource {
    /// Leave the stored image as it is.
    Keep,
    Url(String),
    /// A freshly uploaded file with its sanitized name.
    Upload { file_name: String, file: TempFile },
}

/// Validated product fields.
#[derive(Debug)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i32,
    pub category_id: Option<i32>,
    pub image: ImageSource,
}

impl ProductForm {
    pub fn into_input(self) -> ProductFormResult<ProductInput> {
        let text = |field: Option<Text<String>>| field.map(Text::into_inner);

        let name = text(self.name)
            .map(|value| sanitize_inline_text(&value))
            .unwrap_or_default();
        let price = text(self.price).unwrap_or_default();
        let stock = text(self.stock).unwrap_or_default();

        if name.is_empty() || price.trim().is_empty() || stock.trim().is_empty() {
            return Err(ProductFormError::MissingRequired);
        }
        if name.chars().count() > NAME_MAX_LEN {
            return Err(ProductFormError::NameTooLong);
        }

        let price_cents = parse_price_cents(&price).ok_or_else(|| {
            ProductFormError::InvalidPrice {
                value: price.trim().to_string(),
            }
        })?;

        let stock = match stock.trim().parse::<i32>() {
            Ok(value) if value >= 0 => value,
            _ => {
                return Err(ProductFormError::InvalidStock {
                    value: stock.trim().to_string(),
                });
            }
        };

        let category_id = match non_empty(text(self.category_id).as_deref()) {
            None => None,
            Some(raw) => match raw.parse::<i32>() {
                Ok(id) if id > 0 => Some(id),
                _ => return Err(ProductFormError::InvalidCategory { value: raw }),
            },
        };

        let description = text(self.description)
            .map(|value| sanitize_multiline_text(&value))
            .filter(|value| !value.is_empty());

        let image = match self.image_file.filter(|file| file.size > 0) {
            Some(file) => {
                let original = file.file_name.clone().unwrap_or_default();
                let file_name = sanitize_file_name(&original)
                    .filter(|name| has_allowed_extension(name))
                    .ok_or(ProductFormError::UnsupportedImage {
                        file_name: original,
                    })?;
                ImageSource::Upload { file_name, file }
            }
            None => match non_empty(text(self.image).as_deref()) {
                Some(url) => ImageSource::Url(url),
                None => ImageSource::Keep,
            },
        };

        Ok(ProductInput {
            name,
            description,
            price_cents,
            stock,
            category_id,
            image,
        })
    }
}

impl ProductInput {
    /// Build the insert payload. `image` is the resolved public URL, if any.
    pub fn into_new_product(self, image: Option<String>) -> NewProduct {
        let mut new_product = NewProduct::new(self.name, self.price_cents, self.stock);
        if let Some(description) = self.description {
            new_product = new_product.with_description(description);
        }
        if let Some(category_id) = self.category_id {
            new_product = new_product.with_category_id(category_id);
        }
        if let Some(image) = image {
            new_product = new_product.with_image(image);
        }
        new_product
    }

    /// Build the update payload for `product`. A `None` image keeps the stored one.
    pub fn into_update_product(self, product: &Product, image: Option<String>) -> UpdateProduct {
        let mut update = UpdateProduct::from_product(product);
        update.name = self.name;
        update.description = self.description;
        update.price_cents = self.price_cents;
        update.stock = self.stock;
        update.category_id = self.category_id;
        if image.is_some() {
            update.image = image;
        }
        update
    }
}

/// Parse a non-negative decimal amount with at most two fraction digits into cents.
/// Amounts above [`MAX_PRICE_CENTS`] are rejected.
pub fn parse_price_cents(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.len() > 2
        || !whole.chars().all(|ch| ch.is_ascii_digit())
        || !fraction.chars().all(|ch| ch.is_ascii_digit())
    {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    whole
        .checked_mul(100)?
        .checked_add(fraction)
        .filter(|cents| *cents <= MAX_PRICE_CENTS)
}

/// Reduce an uploaded file name to ASCII letters, digits, `.`, `-` and `_`.
/// Returns `None` when nothing usable remains.
pub fn sanitize_file_name(input: &str) -> Option<String> {
    let base = input.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .trim()
        .chars()
        .filter_map(|ch| match ch {
            ch if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') => Some(ch),
            ch if ch.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();

    let cleaned = cleaned.trim_start_matches(['.', '_']).to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}

fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
