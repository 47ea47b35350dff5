use crate::models::{ParseCategoryError, ParseRoleError, ProductCategory, UserRole};
use thiserror::Error;

/// Errors that can occur when parsing filter expressions
#[derive(Debug, Error)]
pub enum FilterParseError {
    #[error("Unknown filter field '{field}' for {resource}. Valid fields are: {valid}")]
    UnknownField {
        resource: &'static str,
        field: String,
        valid: &'static str,
    },

    #[error("Empty filter value for field '{0}'")]
    EmptyValue(String),

    #[error("Filter field '{field}' expects a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid value '{value}' for field '{field}'. Valid values are: {valid}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        valid: &'static str,
    },

    #[error("Invalid filter expression: {0}")]
    InvalidExpression(String),
}

impl From<ParseCategoryError> for FilterParseError {
    fn from(err: ParseCategoryError) -> Self {
        FilterParseError::InvalidChoice {
            field: "category",
            value: err.0,
            valid: ProductCategory::VALID_NAMES,
        }
    }
}

impl From<ParseRoleError> for FilterParseError {
    fn from(err: ParseRoleError) -> Self {
        FilterParseError::InvalidChoice {
            field: "role",
            value: err.0,
            valid: UserRole::VALID_NAMES,
        }
    }
}
