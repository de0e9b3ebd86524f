use serde::Deserialize;
use thiserror::Error;

pub type CartFormResult<T> = Result<T, CartFormError>;

#[derive(Debug, Error)]
pub enum CartFormError {
    #[error("Quantity must be a whole number of at least 1.")]
    InvalidQuantity,
}

/// Body of `POST /cart/add/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct AddToCartForm {
    #[serde(default)]
    pub qty: Option<String>,
}

impl AddToCartForm {
    /// Requested quantity, defaulting to one when the field is missing or blank.
    pub fn quantity(&self) -> CartFormResult<i32> {
        match self.qty.as_deref().map(str::trim) {
            None | Some("") => Ok(1),
            Some(raw) => match raw.parse::<i32>() {
                Ok(quantity) if quantity >= 1 => Ok(quantity),
                _ => Err(CartFormError::InvalidQuantity),
            },
        }
    }
}

/// Body of `POST /cart/update`: parallel `product_id` and `quantity` fields,
/// one pair per cart row. Parse with `serde_html_form` to keep repeated keys.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCartForm {
    #[serde(default)]
    pub product_id: Vec<i32>,
    #[serde(default)]
    pub quantity: Vec<String>,
}

impl UpdateCartForm {
    /// Pairs of product id and requested quantity. Quantities that fail to
    /// parse count as 1.
    pub fn lines(&self) -> Vec<(i32, i32)> {
        self.product_id
            .iter()
            .zip(self.quantity.iter())
            .map(|(product_id, raw)| (*product_id, raw.trim().parse::<i32>().unwrap_or(1)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_defaults_to_one() {
        assert_eq!(AddToCartForm::default().quantity().unwrap(), 1);

        let form = AddToCartForm {
            qty: Some(" 3 ".to_string()),
        };
        assert_eq!(form.quantity().unwrap(), 3);
    }

    #[test]
    fn add_form_rejects_non_positive_quantity() {
        for raw in ["0", "-2", "many"] {
            let form = AddToCartForm {
                qty: Some(raw.to_string()),
            };
            assert!(form.quantity().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn update_form_parses_repeated_keys() {
        let form: UpdateCartForm =
            serde_html_form::from_str("product_id=4&quantity=2&product_id=9&quantity=abc")
                .unwrap();

        assert_eq!(form.lines(), vec![(4, 2), (9, 1)]);
    }
}
