//! Builds the parameterized statements for the riddle table.

use crate::pagination::SortOrder;
use crate::model::RiddleProperty;

pub const RIDDLE_TABLE: &str = "riddle";
const COLUMNS: &str = "\"id\", \"name\"";

/// Quote identifier for PostgreSQL (safe: only from config or whitelisted properties).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

/// ORDER BY from the requested sort; insertion order (id ascending) when empty,
/// with id appended as a tiebreak otherwise.
pub fn order_by_clause(sort: &[SortOrder]) -> String {
    let mut parts: Vec<String> = sort
        .iter()
        .map(|s| format!("{} {}", quoted(s.property.column()), s.direction.keyword()))
        .collect();
    if !sort.iter().any(|s| s.property == RiddleProperty::Id) {
        parts.push(format!("{} ASC", quoted(RiddleProperty::Id.column())));
    }
    format!(" ORDER BY {}", parts.join(", "))
}

/// $1 = name.
pub fn insert(schema: &str) -> String {
    format!(
        "INSERT INTO {} (\"name\") VALUES ($1) RETURNING {}",
        qualified_table(schema, RIDDLE_TABLE),
        COLUMNS
    )
}

/// $1 = name, $2 = id.
pub fn update(schema: &str) -> String {
    format!(
        "UPDATE {} SET \"name\" = $1 WHERE \"id\" = $2 RETURNING {}",
        qualified_table(schema, RIDDLE_TABLE),
        COLUMNS
    )
}

/// $1 = id.
pub fn select_by_id(schema: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE \"id\" = $1",
        COLUMNS,
        qualified_table(schema, RIDDLE_TABLE)
    )
}

/// $1 = limit, $2 = offset.
pub fn select_page(schema: &str, sort: &[SortOrder]) -> String {
    format!(
        "SELECT {} FROM {}{} LIMIT $1 OFFSET $2",
        COLUMNS,
        qualified_table(schema, RIDDLE_TABLE),
        order_by_clause(sort)
    )
}

pub fn count(schema: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", qualified_table(schema, RIDDLE_TABLE))
}

/// $1 = id.
pub fn delete(schema: &str) -> String {
    format!("DELETE FROM {} WHERE \"id\" = $1", qualified_table(schema, RIDDLE_TABLE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Direction;

    #[test]
    fn default_order_is_insertion_order() {
        assert_eq!(order_by_clause(&[]), " ORDER BY \"id\" ASC");
    }

    #[test]
    fn id_tiebreak_added_for_name_sort() {
        let sort = [SortOrder { property: RiddleProperty::Name, direction: Direction::Desc }];
        assert_eq!(order_by_clause(&sort), " ORDER BY \"name\" DESC, \"id\" ASC");
    }

    #[test]
    fn explicit_id_sort_is_not_duplicated() {
        let sort = [SortOrder { property: RiddleProperty::Id, direction: Direction::Desc }];
        assert_eq!(order_by_clause(&sort), " ORDER BY \"id\" DESC");
    }

    #[test]
    fn statements_use_qualified_table() {
        assert_eq!(
            select_page("public", &[]),
            "SELECT \"id\", \"name\" FROM \"public\".\"riddle\" ORDER BY \"id\" ASC LIMIT $1 OFFSET $2"
        );
        assert_eq!(
            insert("app"),
            "INSERT INTO \"app\".\"riddle\" (\"name\") VALUES ($1) RETURNING \"id\", \"name\""
        );
        assert!(update("app").contains("WHERE \"id\" = $2"));
        assert_eq!(delete("app"), "DELETE FROM \"app\".\"riddle\" WHERE \"id\" = $1");
    }

    #[test]
    fn quoting_escapes_quotes() {
        assert_eq!(quoted("we\"ird"), "\"we\"\"ird\"");
    }
}
