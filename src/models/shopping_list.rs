use super::{Entity, ValidationError, require};
use crate::filter::{EntityFilter, Query, contains_ci};
use serde::{Deserialize, Serialize};

/// One line on the shopping list: how many of which product to buy where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "productName")]
    pub product_name: String,
    pub store: String,
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
}

impl Entity for ShoppingListEntry {
    const COLLECTION: &'static str = "shoppinglist";
    const KIND: &'static str = "shopping-list entry";

    type Filter = ShoppingListFilter;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("productName", &self.product_name)?;
        require("store", &self.store)?;
        if self.quantity < 1 {
            return Err(ValidationError::Min {
                field: "quantity",
                min: 1,
            });
        }
        Ok(())
    }
}

/// Filtering criteria for shopping-list entries. Unset fields constrain
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct ShoppingListFilter {
    product_name: Option<String>,
    store: Option<String>,
    quantity: Option<u32>,
}

impl ShoppingListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product_name(mut self, product_name: Option<impl Into<String>>) -> Self {
        self.product_name = product_name.map(|v| v.into());
        self
    }

    pub fn with_store(mut self, store: Option<impl Into<String>>) -> Self {
        self.store = store.map(|v| v.into());
        self
    }

    pub fn with_quantity(mut self, quantity: Option<u32>) -> Self {
        self.quantity = quantity;
        self
    }
}

impl EntityFilter for ShoppingListFilter {
    type Entity = ShoppingListEntry;

    fn is_empty(&self) -> bool {
        self.product_name.is_none() && self.store.is_none() && self.quantity.is_none()
    }

    fn matches(&self, entry: &ShoppingListEntry) -> bool {
        let product_match = self
            .product_name
            .as_ref()
            .map(|filter| contains_ci(&entry.product_name, filter))
            .unwrap_or(true);

        let store_match = self
            .store
            .as_ref()
            .map(|filter| contains_ci(&entry.store, filter))
            .unwrap_or(true);

        let quantity_match = self
            .quantity
            .map(|filter| entry.quantity == filter)
            .unwrap_or(true);

        product_match && store_match && quantity_match
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.push("productName", self.product_name.as_deref());
        query.push("store", self.store.as_deref());
        query.push_display("quantity", self.quantity.as_ref());
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(product_name: &str, quantity: u32) -> ShoppingListEntry {
        ShoppingListEntry {
            id: format!("{product_name}_id"),
            product_name: product_name.to_string(),
            store: "willeys".to_string(),
            quantity,
            notes: String::new(),
        }
    }

    #[test]
    fn validate_rejects_zero_quantity() {
        assert_eq!(
            entry("bread", 0).validate(),
            Err(ValidationError::Min {
                field: "quantity",
                min: 1
            })
        );
        assert_eq!(entry("bread", 1).validate(), Ok(()));
    }

    #[test]
    fn quantity_filter_predicates_on_value() {
        let entries = [entry("bread", 2), entry("milk", 1), entry("eggs", 2)];
        let filter = ShoppingListFilter::new().with_quantity(Some(2));
        let matched: Vec<_> = entries.iter().filter(|e| filter.matches(e)).collect();
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn wire_field_names_are_preserved() {
        let json = serde_json::to_value(entry("bread", 2)).unwrap();
        assert_eq!(json["productName"], "bread");
        assert_eq!(json["_id"], "bread_id");
    }
}
