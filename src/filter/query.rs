use std::fmt::Display;

/// Ordered set of query parameters built from the optional fields of a
/// resource filter.
///
/// Presence is tracked with `Option`, so an explicit zero or empty-string
/// value still produces a parameter; only unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value` if the field is set.
    pub fn push(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Append a non-string field, string-coerced, if it is set.
    pub fn push_display<T: Display>(&mut self, key: &'static str, value: Option<&T>) {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The accumulated pairs, in insertion order. Suitable for
    /// `reqwest::RequestBuilder::query`.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}
