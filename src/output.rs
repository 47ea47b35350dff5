use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use crate::models::{PantryItem, Product, ShoppingListEntry, User};

/// Table rendering for one entity kind.
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// Build a table with the crate-wide look.
pub fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(Cell::new).collect::<Vec<_>>());
    table
}

/// Render a collection as a table, with a trailing count line.
pub fn format_table<E: TableRow>(entities: &[E]) -> String {
    if entities.is_empty() {
        return format!("{}\n", "No matching entries found.".yellow());
    }

    let mut table = create_styled_table(E::headers());
    for entity in entities {
        table.add_row(entity.row());
    }

    format!(
        "{table}\n{} entr{} shown\n",
        entities.len(),
        if entities.len() == 1 { "y" } else { "ies" }
    )
}

/// Render a single entity as a field/value table.
pub fn format_detail<E: TableRow>(entity: &E) -> String {
    let mut table = create_styled_table(&["Field", "Value"]);
    for (name, value) in E::headers().iter().zip(entity.row()) {
        table.add_row(vec![name.to_string(), value]);
    }
    format!("{table}\n")
}

impl TableRow for Product {
    fn headers() -> &'static [&'static str] {
        &[
            "ID", "Name", "Brand", "Category", "Store", "Location", "Notes", "Tags", "Lifespan",
            "Threshold",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.brand.clone(),
            self.category.to_string(),
            self.store.clone(),
            self.location.clone(),
            self.notes.clone(),
            self.tags.clone(),
            self.lifespan.to_string(),
            self.threshold.to_string(),
        ]
    }
}

impl TableRow for PantryItem {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Product ID", "Date", "Notes", "Tags"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.product_id.clone(),
            self.date.clone(),
            self.notes.clone(),
            self.tags.clone(),
        ]
    }
}

impl TableRow for ShoppingListEntry {
    fn headers() -> &'static [&'static str] {
        &["ID", "Product", "Store", "Quantity", "Notes"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.product_name.clone(),
            self.store.clone(),
            self.quantity.to_string(),
            self.notes.clone(),
        ]
    }
}

impl TableRow for User {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Age", "Company", "Email", "Role"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.age.to_string(),
            self.company.clone(),
            self.email.clone(),
            self.role.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    #[test]
    fn empty_collection_renders_notice_instead_of_table() {
        let rendered = format_table::<User>(&[]);
        assert!(rendered.contains("No matching entries"));
    }

    #[test]
    fn table_includes_every_row() {
        let users = vec![
            User {
                id: "1".into(),
                name: "Chris".into(),
                age: 25,
                company: "UMM".into(),
                email: "chris@this.that".into(),
                role: UserRole::Admin,
            },
            User {
                id: "2".into(),
                name: "Pat".into(),
                age: 37,
                company: "IBM".into(),
                email: "pat@something.com".into(),
                role: UserRole::Editor,
            },
        ];
        let rendered = format_table(&users);
        assert!(rendered.contains("Chris"));
        assert!(rendered.contains("Pat"));
        assert!(rendered.contains("2 entries shown"));
    }
}
