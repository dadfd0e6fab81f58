use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::{map_constraint, StoreError};
use crate::models::Item;

/// Insert a brand new item under a category. We echo the hydrated struct so
/// callers can update their state without having to re-query the database.
/// The parent is checked up front so an unknown category comes back as
/// `NotFound` instead of a raw foreign-key failure.
pub fn create_item(conn: &Connection, category_id: i64, title: &str) -> Result<Item, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::ConstraintViolation(
            "item title must not be empty".into(),
        ));
    }

    let parent_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)",
        params![category_id],
        |row| row.get(0),
    )?;
    if !parent_exists {
        return Err(StoreError::NotFound);
    }

    let now = Utc::now().timestamp_millis();
    conn.execute(
        "INSERT INTO items (title, done, date_created, category_id)
         VALUES (?1, 0, ?2, ?3)",
        params![title, now, category_id],
    )
    .map_err(map_constraint)?;

    Ok(Item {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
        done: false,
        date_created: now,
        category_id,
    })
}

/// Get every item belonging to a specific category, sorted by title under the
/// BINARY collation so the order is byte-exact (uppercase groups before
/// lowercase). Ties fall back to insertion order.
pub fn fetch_items(conn: &Connection, category_id: i64) -> Result<Vec<Item>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, done, date_created, category_id
         FROM items
         WHERE category_id = ?1
         ORDER BY title, id",
    )?;

    let items = stmt
        .query_map([category_id], map_item_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(items)
}

/// Free-text filter over one category's items. An all-whitespace needle falls
/// back to the default title-ordered listing; anything else selects items
/// whose title contains the needle as a case- and diacritic-insensitive
/// substring, returned oldest-first.
///
/// The fold runs here rather than in SQL because `LIKE` only case-folds
/// ASCII. The candidate set is already narrowed to one category by the
/// indexed parent predicate, so the per-row work stays small.
pub fn filter_items(conn: &Connection, category_id: i64, text: &str) -> Result<Vec<Item>, StoreError> {
    let needle = text.trim();
    if needle.is_empty() {
        return fetch_items(conn, category_id);
    }

    let mut stmt = conn.prepare(
        "SELECT id, title, done, date_created, category_id
         FROM items
         WHERE category_id = ?1
         ORDER BY date_created, id",
    )?;

    let needle = fold(needle);
    let items = stmt
        .query_map([category_id], map_item_row)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|item| fold(&item.title).contains(&needle))
        .collect();

    Ok(items)
}

/// Flip the completion flag in place. SQLite evaluates `NOT done` to 0/1, so
/// the toggle is a single write.
pub fn toggle_item(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let updated = conn.execute("UPDATE items SET done = NOT done WHERE id = ?1", params![id])?;

    if updated == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(())
    }
}

/// Retitle an existing item. Like the other update helpers, we surface an
/// explicit error when zero rows are touched.
pub fn update_item(conn: &Connection, id: i64, title: &str) -> Result<(), StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::ConstraintViolation(
            "item title must not be empty".into(),
        ));
    }

    let updated = conn
        .execute(
            "UPDATE items SET title = ?1 WHERE id = ?2",
            params![title, id],
        )
        .map_err(map_constraint)?;

    if updated == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(())
    }
}

/// Permanently delete a single item.
pub fn delete_item(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let deleted = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;

    if deleted == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(())
    }
}

/// Shared row-to-struct mapping for every item query above.
fn map_item_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        title: row.get(1)?,
        done: row.get(2)?,
        date_created: row.get(3)?,
        category_id: row.get(4)?,
    })
}

/// Lowercase the text and strip the Latin diacritics we expect in titles, so
/// "Crème" matches "creme". Anything outside the mapped range passes through
/// untouched.
fn fold(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|ch| match ch {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'ç' => 'c',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ñ' => 'n',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ý' | 'ÿ' => 'y',
            other => other,
        })
        .collect()
}
