use super::error::FilterParseError;

/// A single filter term (e.g., "name:chicken" or "brand:\"some brand\"")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm {
    /// The field the term constrains, lower-cased
    pub field: String,
    /// The value to match, with surrounding quotes stripped
    pub value: String,
}

impl FilterTerm {
    /// Parse a single filter term from a string
    pub fn parse(s: &str) -> Result<Self, FilterParseError> {
        let parts: Vec<&str> = s.splitn(2, ':').collect();
        if parts.len() != 2 {
            return Err(FilterParseError::InvalidExpression(format!(
                "Expected 'field:value' format, got: {}",
                s
            )));
        }

        let field = parts[0].trim().to_lowercase();
        if field.is_empty() {
            return Err(FilterParseError::InvalidExpression(format!(
                "Missing field name in term: {}",
                s
            )));
        }

        let value = parts[1].trim().trim_matches('"').to_string();
        if value.is_empty() {
            return Err(FilterParseError::EmptyValue(field));
        }

        Ok(FilterTerm { field, value })
    }
}

/// A complete filter expression consisting of multiple terms
///
/// Terms are separated by whitespace and combine with AND logic; the typed
/// resource filters built from an expression keep that conjunction.
#[derive(Debug, Clone, Default)]
pub struct FilterExpression {
    pub terms: Vec<FilterTerm>,
}

impl FilterExpression {
    /// Create a new empty filter expression
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Parse a filter expression from a string
    ///
    /// Malformed terms are rejected rather than silently ignored.
    pub fn parse(s: &str) -> Result<Self, FilterParseError> {
        let mut terms = Vec::new();

        for part in split_preserving_quotes(s) {
            terms.push(FilterTerm::parse(part)?);
        }

        Ok(FilterExpression { terms })
    }

    /// Check if this expression is empty (no filters)
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Split a string by whitespace while preserving quoted segments
fn split_preserving_quotes(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' | '\t' if !in_quotes => {
                if i > start {
                    let part = &s[start..i];
                    if !part.trim().is_empty() {
                        parts.push(part.trim());
                    }
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    // Add the last part
    if start < s.len() {
        let part = &s[start..];
        if !part.trim().is_empty() {
            parts.push(part.trim());
        }
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_term() {
        let term = FilterTerm::parse("name:chicken").unwrap();
        assert_eq!(term.field, "name");
        assert_eq!(term.value, "chicken");
    }

    #[test]
    fn test_field_name_is_lowercased() {
        let term = FilterTerm::parse("Name:chicken").unwrap();
        assert_eq!(term.field, "name");
    }

    #[test]
    fn test_parse_quoted_value() {
        let expr = FilterExpression::parse("name:\"fried chicken\" brand:kfc").unwrap();
        assert_eq!(expr.terms.len(), 2);
        assert_eq!(expr.terms[0].value, "fried chicken");
        assert_eq!(expr.terms[1].value, "kfc");
    }

    #[test]
    fn test_value_keeps_colons() {
        let term = FilterTerm::parse("notes:a:b").unwrap();
        assert_eq!(term.field, "notes");
        assert_eq!(term.value, "a:b");
    }

    #[test]
    fn test_empty_value_is_rejected() {
        let result = FilterTerm::parse("name:");
        assert!(matches!(result, Err(FilterParseError::EmptyValue(_))));
    }

    #[test]
    fn test_malformed_term_is_rejected() {
        let result = FilterExpression::parse("not-a-filter");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_expression() {
        let expr = FilterExpression::parse("   ").unwrap();
        assert!(expr.is_empty());
    }
}
