//! Domain models that mirror the SQLite schema and get passed back to
//! callers. The intent is that these types stay light-weight data holders so
//! the persistence layer can focus on queries and callers on presentation.

use std::fmt;

#[derive(Debug, Clone)]
/// A user-orderable grouping of to-do items. The `sequence` provides the
/// manual sort key maintained by drag-to-reorder, while `color` is carried
/// verbatim for whatever front-end draws the list.
pub struct Category {
    /// Primary key from the database. We keep this around even when a caller
    /// only needs display information because edit/delete flows bubble the id
    /// back to the persistence layer.
    pub id: i64,
    /// User-facing display name, never empty once trimmed.
    pub name: String,
    /// Hex color token (for example `"#5AC8FA"`). The engine treats it as an
    /// opaque attribute; only the presentation layer interprets it.
    pub color: String,
    /// Manual display order among all categories. Kept as an integer so
    /// reordering touches a bounded range of rows instead of rewriting the
    /// whole table.
    pub sequence: i64,
    /// Creation time in UTC milliseconds.
    pub date_created: i64,
}

impl fmt::Display for Category {
    /// Write the category name to any formatter so the type plays nicely with
    /// widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone)]
/// In-memory representation of one to-do entry belonging to a category.
pub struct Item {
    /// Primary key from the SQLite store.
    pub id: i64,
    /// Title displayed in lists and search results.
    pub title: String,
    /// Completion flag, toggled from the list view.
    pub done: bool,
    /// Creation time in UTC milliseconds, also the sort key for filtered
    /// search results.
    pub date_created: i64,
    /// Foreign key back to the owning category. Kept as a plain id so the
    /// relation is a lookup, never a live back-pointer.
    pub category_id: i64,
}

impl Item {
    /// Compose a `[x] Title` checklist line. Text front-ends rely on this
    /// ready-to-use formatting instead of rebuilding it per view.
    pub fn display_line(&self) -> String {
        if self.done {
            format!("[x] {}", self.title)
        } else {
            format!("[ ] {}", self.title)
        }
    }
}
