use super::{Entity, ValidationError, require};
use crate::filter::{EntityFilter, Query, contains_ci};
use serde::{Deserialize, Serialize};

/// Something currently sitting in the pantry, linked to its catalog product
/// by `product_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryItem {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "prodID")]
    pub product_id: String,
    pub name: String,
    /// Purchase date as free text, e.g. "May 15, 2022".
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: String,
}

impl Entity for PantryItem {
    const COLLECTION: &'static str = "pantry";
    const KIND: &'static str = "pantry item";

    type Filter = PantryFilter;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("prodID", &self.product_id)?;
        Ok(())
    }

    /// A blank purchase date means "bought today".
    fn apply_defaults(&mut self) {
        if self.date.trim().is_empty() {
            self.date = chrono::Local::now().format("%B %-d, %Y").to_string();
        }
    }
}

/// Filtering criteria for pantry items. Unset fields constrain nothing.
#[derive(Debug, Clone, Default)]
pub struct PantryFilter {
    name: Option<String>,
    date: Option<String>,
    product_id: Option<String>,
    notes: Option<String>,
    tags: Option<String>,
}

impl PantryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: Option<impl Into<String>>) -> Self {
        self.name = name.map(|v| v.into());
        self
    }

    pub fn with_date(mut self, date: Option<impl Into<String>>) -> Self {
        self.date = date.map(|v| v.into());
        self
    }

    pub fn with_product_id(mut self, product_id: Option<impl Into<String>>) -> Self {
        self.product_id = product_id.map(|v| v.into());
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
}

impl EntityFilter for PantryFilter {
    type Entity = PantryItem;

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date.is_none()
            && self.product_id.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
    }

    fn matches(&self, item: &PantryItem) -> bool {
        let name_match = self
            .name
            .as_ref()
            .map(|filter| contains_ci(&item.name, filter))
            .unwrap_or(true);

        let date_match = self
            .date
            .as_ref()
            .map(|filter| contains_ci(&item.date, filter))
            .unwrap_or(true);

        // Product ids are opaque identifiers, so exact equality rather than
        // substring containment.
        let product_match = self
            .product_id
            .as_ref()
            .map(|filter| &item.product_id == filter)
            .unwrap_or(true);

        let notes_match = self
            .notes
            .as_ref()
            .map(|filter| contains_ci(&item.notes, filter))
            .unwrap_or(true);

        let tags_match = self
            .tags
            .as_ref()
            .map(|filter| contains_ci(&item.tags, filter))
            .unwrap_or(true);

        name_match && date_match && product_match && notes_match && tags_match
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.push("name", self.name.as_deref());
        query.push("date", self.date.as_deref());
        query.push("prodID", self.product_id.as_deref());
        query.push("notes", self.notes.as_deref());
        query.push("tags", self.tags.as_deref());
        query
    }
}
