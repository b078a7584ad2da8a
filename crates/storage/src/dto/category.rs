use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Category;

/// Response containing a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

/// Request payload for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,
}

/// Request payload for updating a category.
///
/// `id` comes from the route; whatever the body carries is overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_required_id"))]
    pub id: i64,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,
}

fn validate_required_id(id: i64) -> Result<(), validator::ValidationError> {
    if id == 0 {
        let mut err = validator::ValidationError::new("required");
        err.message = Some("Id is required".into());
        return Err(err);
    }
    Ok(())
}

impl From<CreateCategoryRequest> for Category {
    fn from(req: CreateCategoryRequest) -> Self {
        Category::unsaved(req.name)
    }
}

impl From<UpdateCategoryRequest> for Category {
    fn from(req: UpdateCategoryRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_bounds() {
        let one = CreateCategoryRequest {
            name: "a".to_string(),
        };
        let max = CreateCategoryRequest {
            name: "x".repeat(255),
        };
        assert!(one.validate().is_ok());
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_and_long_names() {
        let empty = CreateCategoryRequest {
            name: String::new(),
        };
        let long = CreateCategoryRequest {
            name: "x".repeat(256),
        };

        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_length_is_counted_in_characters() {
        let req = CreateCategoryRequest {
            name: "é".repeat(255),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_missing_name_deserializes_as_empty() {
        let req: CreateCategoryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.name, "");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_requires_id() {
        let req = UpdateCategoryRequest {
            id: 0,
            name: "Books".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("id"));

        let req = UpdateCategoryRequest {
            id: 3,
            name: "Books".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_response_from_category() {
        let response = CategoryResponse::from(Category {
            id: 9,
            name: "Garden".to_string(),
        });
        assert_eq!(response.id, 9);
        assert_eq!(response.name, "Garden");
    }
}
