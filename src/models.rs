//! Entity types for the four resources exposed by the pantry API
//!
//! All entities are flat records whose `_id` is assigned by the server and
//! never changes afterwards. Each entity carries its own filter struct and
//! the client-side validation applied before a create request is sent.

mod pantry;
mod product;
mod shopping_list;
mod user;

pub use pantry::{PantryFilter, PantryItem};
pub use product::{ParseCategoryError, Product, ProductCategory, ProductFilter};
pub use shopping_list::{ShoppingListEntry, ShoppingListFilter};
pub use user::{ParseRoleError, User, UserFilter, UserRole};

use crate::filter::EntityFilter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Violations of the client-side creation rules. These are caught before a
/// request is made; they never reach the network layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("{field} must be between {min} and {max}")]
    Range {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{field} must be at least {min}")]
    Min { field: &'static str, min: u32 },

    #[error("email must be a valid address")]
    InvalidEmail,
}

/// One of the four resource kinds served by the pantry API.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Path suffix of the resource collection, e.g. "product".
    const COLLECTION: &'static str;

    /// Singular human-readable name used in messages.
    const KIND: &'static str;

    type Filter: EntityFilter<Entity = Self>;

    /// The server-assigned identifier; empty on entities not yet created.
    fn id(&self) -> &str;

    /// Check the client-side creation rules.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Fill fields the user may leave blank on creation. Most entities have
    /// none.
    fn apply_defaults(&mut self) {}
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

fn require_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    require(field, value)?;
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::Length { field, min, max });
    }
    Ok(())
}
