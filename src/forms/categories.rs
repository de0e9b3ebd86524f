use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::{invalid_fields, non_empty, sanitize_inline_text};

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum length allowed for a subcategory label.
const SUBCATEGORY_MAX_LEN: usize = 128;
const SUBCATEGORY_MAX_LEN_VALIDATOR: u64 = SUBCATEGORY_MAX_LEN as u64;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("Please check the following fields: {}", invalid_fields(.0))]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("Category name is required.")]
    EmptyName,
}

/// Form payload shared by the "Add category" and "Edit category" pages.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryForm {
    /// Name entered by the admin.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional subcategory label.
    #[validate(length(max = SUBCATEGORY_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub subcategory: Option<String>,
}

impl CategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        let (name, subcategory) = self.sanitized()?;

        let mut new_category = NewCategory::new(name);
        if let Some(subcategory) = subcategory {
            new_category = new_category.with_subcategory(subcategory);
        }

        Ok(new_category)
    }

    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    /// A blank subcategory clears the stored one.
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        let (name, subcategory) = self.sanitized()?;
        Ok(UpdateCategory::new(name, subcategory))
    }

    fn sanitized(self) -> CategoryFormResult<(String, Option<String>)> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        Ok((name, non_empty(self.subcategory.as_deref())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_form_sanitizes_and_converts() {
        let form = CategoryForm {
            name: "  Fine   Jewellery  ".to_string(),
            subcategory: Some("  Rings ".to_string()),
        };

        let new_category = form
            .into_new_category()
            .expect("expected conversion to succeed");

        assert_eq!(new_category.name, "Fine Jewellery");
        assert_eq!(new_category.subcategory.as_deref(), Some("Rings"));
    }

    #[test]
    fn category_form_rejects_empty_name() {
        let form = CategoryForm {
            name: "   ".to_string(),
            subcategory: None,
        };

        let result = form.into_new_category();

        assert!(matches!(result, Err(CategoryFormError::EmptyName)));
    }

    #[test]
    fn edit_form_clears_blank_subcategory() {
        let form = CategoryForm {
            name: "Rings".to_string(),
            subcategory: Some("  ".to_string()),
        };

        let update = form.into_update_category().unwrap();

        assert_eq!(update.name, "Rings");
        assert_eq!(update.subcategory, None);
    }
}
