use super::error::FilterParseError;
use super::parser::FilterExpression;
use crate::models::{
    PantryFilter, ProductCategory, ProductFilter, ShoppingListFilter, UserFilter, UserRole,
};
use std::str::FromStr;

const PRODUCT_FIELDS: &str =
    "name, description, brand, category, store, location, notes, tags, lifespan, threshold";
const PANTRY_FIELDS: &str = "name, date, prodid, notes, tags";
const SHOPPING_LIST_FIELDS: &str = "productname, store, quantity";
const USER_FIELDS: &str = "name, age, company, email, role";

/// Convert a FilterExpression to a ProductFilter
///
/// Unknown field names and malformed values are rejected so that typos do
/// not silently turn into an unfiltered listing.
pub fn to_product_filter(expr: &FilterExpression) -> Result<ProductFilter, FilterParseError> {
    let mut filter = ProductFilter::new();

    for term in &expr.terms {
        filter = match term.field.as_str() {
            "name" => filter.with_name(Some(&term.value)),
            "description" => filter.with_description(Some(&term.value)),
            "brand" => filter.with_brand(Some(&term.value)),
            "category" => filter.with_category(Some(ProductCategory::from_str(&term.value)?)),
            "store" => filter.with_store(Some(&term.value)),
            "location" => filter.with_location(Some(&term.value)),
            "notes" => filter.with_notes(Some(&term.value)),
            "tags" => filter.with_tags(Some(&term.value)),
            "lifespan" => filter.with_lifespan(Some(parse_count("lifespan", &term.value)?)),
            "threshold" => filter.with_threshold(Some(parse_count("threshold", &term.value)?)),
            _ => {
                return Err(FilterParseError::UnknownField {
                    resource: "products",
                    field: term.field.clone(),
                    valid: PRODUCT_FIELDS,
                });
            }
        };
    }

    Ok(filter)
}

/// Convert a FilterExpression to a PantryFilter
pub fn to_pantry_filter(expr: &FilterExpression) -> Result<PantryFilter, FilterParseError> {
    let mut filter = PantryFilter::new();

    for term in &expr.terms {
        filter = match term.field.as_str() {
            "name" => filter.with_name(Some(&term.value)),
            "date" => filter.with_date(Some(&term.value)),
            "prodid" => filter.with_product_id(Some(&term.value)),
            "notes" => filter.with_notes(Some(&term.value)),
            "tags" => filter.with_tags(Some(&term.value)),
            _ => {
                return Err(FilterParseError::UnknownField {
                    resource: "pantry items",
                    field: term.field.clone(),
                    valid: PANTRY_FIELDS,
                });
            }
        };
    }

    Ok(filter)
}

/// Convert a FilterExpression to a ShoppingListFilter
pub fn to_shopping_list_filter(
    expr: &FilterExpression,
) -> Result<ShoppingListFilter, FilterParseError> {
    let mut filter = ShoppingListFilter::new();

    for term in &expr.terms {
        filter = match term.field.as_str() {
            "productname" | "product" => filter.with_product_name(Some(&term.value)),
            "store" => filter.with_store(Some(&term.value)),
            "quantity" => filter.with_quantity(Some(parse_count("quantity", &term.value)?)),
            _ => {
                return Err(FilterParseError::UnknownField {
                    resource: "shopping-list entries",
                    field: term.field.clone(),
                    valid: SHOPPING_LIST_FIELDS,
                });
            }
        };
    }

    Ok(filter)
}

/// Convert a FilterExpression to a UserFilter
pub fn to_user_filter(expr: &FilterExpression) -> Result<UserFilter, FilterParseError> {
    let mut filter = UserFilter::new();

    for term in &expr.terms {
        filter = match term.field.as_str() {
            "name" => filter.with_name(Some(&term.value)),
            "age" => filter.with_age(Some(parse_count("age", &term.value)?)),
            "company" => filter.with_company(Some(&term.value)),
            "email" => filter.with_email(Some(&term.value)),
            "role" => filter.with_role(Some(UserRole::from_str(&term.value)?)),
            _ => {
                return Err(FilterParseError::UnknownField {
                    resource: "users",
                    field: term.field.clone(),
                    valid: USER_FIELDS,
                });
            }
        };
    }

    Ok(filter)
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, FilterParseError> {
    value
        .parse()
        .map_err(|_| FilterParseError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
