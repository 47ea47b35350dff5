//! Filter expression parsing, query building, and in-memory matching
//!
//! Every resource exposes the same two filtering surfaces: a query-string
//! representation sent to the server, and an equivalent predicate applied to
//! an already-fetched collection for instant refinement without a round
//! trip. Both are derived from the same sparse filter struct, so the two
//! views can never drift apart.
//!
//! # Expression syntax
//!
//! ```text
//! field:value            Constrain a field
//! field:"two words"      Quote values containing whitespace
//! multiple terms         Terms combine with AND
//! ```
//!
//! # Examples
//!
//! ```text
//! name:chicken                            # products whose name contains "chicken"
//! brand:kfc category:deli                 # deli products from KFC
//! quantity:2                              # shopping-list entries with quantity 2
//! role:admin company:ohmnet               # admin users at OHMNET
//! ```
//!
//! Valid field names depend on the resource; see [`matcher`].

pub mod error;
pub mod matcher;
pub mod parser;
pub mod query;

pub use error::FilterParseError;
pub use parser::{FilterExpression, FilterTerm};
pub use query::Query;

/// The two filtering surfaces of one resource: a server-side query and an
/// equivalent in-memory predicate. Unset fields constrain nothing.
pub trait EntityFilter: Default {
    type Entity;

    /// True when no field is set; such a filter matches every entity.
    fn is_empty(&self) -> bool;

    /// Conjunction of the per-field predicates over `entity`.
    fn matches(&self, entity: &Self::Entity) -> bool;

    /// Query parameters equivalent to this filter, for a collection GET.
    fn query(&self) -> Query;
}

/// Apply `filter` to an already-fetched collection.
///
/// Returns the matching subsequence in its original relative order; the
/// input is never mutated. An empty filter returns the collection unchanged.
pub fn apply<F: EntityFilter>(entities: &[F::Entity], filter: &F) -> Vec<F::Entity>
where
    F::Entity: Clone,
{
    entities
        .iter()
        .filter(|entity| filter.matches(entity))
        .cloned()
        .collect()
}

/// Case-insensitive substring containment, the predicate used for every
/// free-text field.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
