use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::review::{MAX_RATING, MIN_RATING, NewReview};
use crate::forms::{invalid_fields, sanitize_multiline_text};

const CONTENT_MAX_LEN: u64 = 2000;

pub type ReviewFormResult<T> = Result<T, ReviewFormError>;

#[derive(Debug, Error)]
pub enum ReviewFormError {
    #[error("Please check the following fields: {}", invalid_fields(.0))]
    Validation(#[from] ValidationErrors),
    #[error("Review text cannot be empty.")]
    EmptyContent,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(length(min = 1, max = CONTENT_MAX_LEN))]
    pub content: String,
    #[validate(range(min = MIN_RATING, max = MAX_RATING))]
    pub rating: i32,
}

impl ReviewForm {
    pub fn into_new_review(self, user_id: i32, product_id: i32) -> ReviewFormResult<NewReview> {
        self.validate()?;

        let content = sanitize_multiline_text(&self.content);
        if content.is_empty() {
            return Err(ReviewFormError::EmptyContent);
        }

        Ok(NewReview::new(user_id, product_id, content, self.rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_outside_range_is_rejected() {
        for rating in [0, 6] {
            let form = ReviewForm {
                content: "Great mug".to_string(),
                rating,
            };
            assert!(matches!(
                form.into_new_review(1, 2),
                Err(ReviewFormError::Validation(_))
            ));
        }
    }

    #[test]
    fn valid_review_is_converted() {
        let form = ReviewForm {
            content: "  Great mug  ".to_string(),
            rating: 5,
        };

        let review = form.into_new_review(3, 7).unwrap();

        assert_eq!(review.user_id, 3);
        assert_eq!(review.product_id, 7);
        assert_eq!(review.content, "Great mug");
        assert_eq!(review.rating, 5);
    }
}
