use super::{Entity, ValidationError, require, require_length};
use crate::filter::{EntityFilter, Query, contains_ci};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A catalog product that pantry items and shopping-list entries refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: ProductCategory,
    pub store: String,
    pub location: String,
    pub notes: String,
    #[serde(default)]
    pub tags: String,
    pub lifespan: u32,
    pub threshold: u32,
    #[serde(default)]
    pub image: Option<String>,
}

/// Shelf section a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "dry goods")]
    DryGoods,
    #[serde(rename = "bakery")]
    Bakery,
    #[serde(rename = "produce")]
    Produce,
    #[serde(rename = "deli")]
    Deli,
    #[serde(rename = "canned good")]
    CannedGood,
    #[serde(rename = "cereals")]
    Cereals,
    #[serde(rename = "seafood")]
    Seafood,
    #[serde(rename = "desserts")]
    Desserts,
}

impl ProductCategory {
    /// The wire name of this category, as the server stores it.
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::DryGoods => "dry goods",
            ProductCategory::Bakery => "bakery",
            ProductCategory::Produce => "produce",
            ProductCategory::Deli => "deli",
            ProductCategory::CannedGood => "canned good",
            ProductCategory::Cereals => "cereals",
            ProductCategory::Seafood => "seafood",
            ProductCategory::Desserts => "desserts",
        }
    }

    /// Comma-separated list of every wire name, for error messages.
    pub const VALID_NAMES: &'static str =
        "dry goods, bakery, produce, deli, canned good, cereals, seafood, desserts";
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a category name the wire format does not know.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category '{0}'. Valid categories are: {valid}", valid = ProductCategory::VALID_NAMES)]
pub struct ParseCategoryError(pub String);

impl FromStr for ProductCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dry goods" => Ok(ProductCategory::DryGoods),
            "bakery" => Ok(ProductCategory::Bakery),
            "produce" => Ok(ProductCategory::Produce),
            "deli" => Ok(ProductCategory::Deli),
            "canned good" => Ok(ProductCategory::CannedGood),
            "cereals" => Ok(ProductCategory::Cereals),
            "seafood" => Ok(ProductCategory::Seafood),
            "desserts" => Ok(ProductCategory::Desserts),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

impl Entity for Product {
    const COLLECTION: &'static str = "product";
    const KIND: &'static str = "product";

    type Filter = ProductFilter;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_length("name", &self.name, 2, 50)?;
        require_length("brand", &self.brand, 2, 50)?;
        require_length("description", &self.description, 2, 500)?;
        require("store", &self.store)?;
        require("location", &self.location)?;
        require("notes", &self.notes)?;
        Ok(())
    }
}

/// Filtering criteria for products. Unset fields constrain nothing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    name: Option<String>,
    description: Option<String>,
    brand: Option<String>,
    category: Option<ProductCategory>,
    store: Option<String>,
    location: Option<String>,
    notes: Option<String>,
    tags: Option<String>,
    lifespan: Option<u32>,
    threshold: Option<u32>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: Option<impl Into<String>>) -> Self {
        self.name = name.map(|v| v.into());
        self
    }

    pub fn with_description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = description.map(|v| v.into());
        self
    }

    pub fn with_brand(mut self, brand: Option<impl Into<String>>) -> Self {
        self.brand = brand.map(|v| v.into());
        self
    }

    pub fn with_category(mut self, category: Option<ProductCategory>) -> Self {
        self.category = category;
        self
    }

    pub fn with_store(mut self, store: Option<impl Into<String>>) -> Self {
        self.store = store.map(|v| v.into());
        self
    }

    pub fn with_location(mut self, location: Option<impl Into<String>>) -> Self {
        self.location = location.map(|v| v.into());
        self
    }

    pub fn with_notes(mut self, notes: Option<impl Into<String>>) -> Self {
        self.notes = notes.map(|v| v.into());
        self
    }

    pub fn with_tags(mut self, tags: Option<impl Into<String>>) -> Self {
        self.tags = tags.map(|v| v.into());
        self
    }

    pub fn with_lifespan(mut self, lifespan: Option<u32>) -> Self {
        self.lifespan = lifespan;
        self
    }

    pub fn with_threshold(mut self, threshold: Option<u32>) -> Self {
        self.threshold = threshold;
        self
    }
}

impl EntityFilter for ProductFilter {
    type Entity = Product;

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.brand.is_none()
            && self.category.is_none()
            && self.store.is_none()
            && self.location.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
            && self.lifespan.is_none()
            && self.threshold.is_none()
    }

    fn matches(&self, product: &Product) -> bool {
        let name_match = self
            .name
            .as_ref()
            .map(|filter| contains_ci(&product.name, filter))
            .unwrap_or(true);

        let description_match = self
            .description
            .as_ref()
            .map(|filter| contains_ci(&product.description, filter))
            .unwrap_or(true);

        let brand_match = self
            .brand
            .as_ref()
            .map(|filter| contains_ci(&product.brand, filter))
            .unwrap_or(true);

        let category_match = self
            .category
            .map(|filter| product.category == filter)
            .unwrap_or(true);

        let store_match = self
            .store
            .as_ref()
            .map(|filter| contains_ci(&product.store, filter))
            .unwrap_or(true);

        let location_match = self
            .location
            .as_ref()
            .map(|filter| contains_ci(&product.location, filter))
            .unwrap_or(true);

        let notes_match = self
            .notes
            .as_ref()
            .map(|filter| contains_ci(&product.notes, filter))
            .unwrap_or(true);

        let tags_match = self
            .tags
            .as_ref()
            .map(|filter| contains_ci(&product.tags, filter))
            .unwrap_or(true);

        // Numeric fields predicate on the value itself, matching what the
        // server does with these query parameters.
        let lifespan_match = self
            .lifespan
            .map(|filter| product.lifespan == filter)
            .unwrap_or(true);

        let threshold_match = self
            .threshold
            .map(|filter| product.threshold == filter)
            .unwrap_or(true);

        name_match
            && description_match
            && brand_match
            && category_match
            && store_match
            && location_match
            && notes_match
            && tags_match
            && lifespan_match
            && threshold_match
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.push("name", self.name.as_deref());
        query.push("brand", self.brand.as_deref());
        query.push("description", self.description.as_deref());
        query.push_display("category", self.category.as_ref());
        query.push("store", self.store.as_deref());
        query.push("location", self.location.as_deref());
        query.push("notes", self.notes.as_deref());
        query.push("tags", self.tags.as_deref());
        query.push_display("lifespan", self.lifespan.as_ref());
        query.push_display("threshold", self.threshold.as_ref());
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "fried chicken_id".to_string(),
            name: "fried chicken".to_string(),
            description: "Delicious fried chicken legs and wings".to_string(),
            brand: "KFC".to_string(),
            category: ProductCategory::Deli,
            store: "willeys".to_string(),
            location: "UMM Student Center Store".to_string(),
            notes: "chicken".to_string(),
            tags: "fried".to_string(),
            lifespan: 2,
            threshold: 23,
            image: None,
        }
    }

    #[test]
    fn validate_accepts_a_complete_product() {
        assert_eq!(sample_product().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_short_name() {
        let mut product = sample_product();
        product.name = "x".to_string();
        assert_eq!(
            product.validate(),
            Err(ValidationError::Length {
                field: "name",
                min: 2,
                max: 50
            })
        );
    }

    #[test]
    fn validate_rejects_blank_location() {
        let mut product = sample_product();
        product.location = "   ".to_string();
        assert_eq!(
            product.validate(),
            Err(ValidationError::Required { field: "location" })
        );
    }

    #[test]
    fn category_round_trips_through_wire_name() {
        let parsed: ProductCategory = "canned good".parse().unwrap();
        assert_eq!(parsed, ProductCategory::CannedGood);
        assert_eq!(parsed.as_str(), "canned good");
    }

    #[test]
    fn unknown_category_error_lists_valid_names() {
        let err = "frozen".parse::<ProductCategory>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("frozen"));
        assert!(message.contains("canned good"));
    }

    #[test]
    fn lifespan_filter_predicates_on_value_not_result_length() {
        let product = sample_product();
        assert!(
            ProductFilter::new()
                .with_lifespan(Some(2))
                .matches(&product)
        );
        assert!(
            !ProductFilter::new()
                .with_lifespan(Some(3))
                .matches(&product)
        );
    }

    #[test]
    fn query_includes_only_set_fields() {
        let query = ProductFilter::new()
            .with_name(Some("chicken"))
            .with_category(Some(ProductCategory::Deli))
            .with_threshold(Some(23))
            .query();
        assert_eq!(
            query.pairs(),
            &[
                ("name", "chicken".to_string()),
                ("category", "deli".to_string()),
                ("threshold", "23".to_string()),
            ]
        );
    }

    #[test]
    fn unsaved_product_serializes_without_id() {
        let mut product = sample_product();
        product.id = String::new();
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["category"], "deli");
    }
}
