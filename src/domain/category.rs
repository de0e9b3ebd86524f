use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Product category with an optional free-form subcategory label.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// Optional subcategory label shown next to the name.
    pub subcategory: Option<String>,
    /// Timestamp for when the category record was created.
    pub created_at: NaiveDateTime,
}

impl Category {
    /// Display label combining name and subcategory, e.g. `Rings / Gold`.
    pub fn label(&self) -> String {
        match self.subcategory.as_deref() {
            Some(subcategory) if !subcategory.is_empty() => {
                format!("{} / {}", self.name, subcategory)
            }
            _ => self.name.clone(),
        }
    }
}

/// Payload required to insert a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub subcategory: Option<String>,
}

impl NewCategory {
    /// Build a new category payload with the supplied name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subcategory: None,
        }
    }

    /// Attach a subcategory label to the category payload.
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }
}

/// Replacement values applied when editing a category; `None` clears the subcategory.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub name: String,
    pub subcategory: Option<String>,
}

impl UpdateCategory {
    pub fn new(name: impl Into<String>, subcategory: Option<String>) -> Self {
        Self {
            name: name.into(),
            subcategory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(subcategory: Option<&str>) -> Category {
        Category {
            id: 1,
            name: "Rings".to_string(),
            subcategory: subcategory.map(str::to_string),
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn label_includes_subcategory_when_present() {
        assert_eq!(category(Some("Gold")).label(), "Rings / Gold");
        assert_eq!(category(Some("")).label(), "Rings");
        assert_eq!(category(None).label(), "Rings");
    }
}
