use std::collections::HashMap;

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::{map_constraint, StoreError};
use crate::models::Category;

/// Retrieve every category sorted by its manual sequence. The query doubles
/// as the single source of truth for how callers order categories: ties fall
/// back to insertion order, and gaps left by deletions never change the
/// relative order of the survivors.
pub fn fetch_categories(conn: &Connection) -> Result<Vec<Category>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, color, sequence, date_created
         FROM categories
         ORDER BY sequence, id",
    )?;

    let categories = stmt
        .query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
                color: row.get(2)?,
                sequence: row.get(3)?,
                date_created: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(categories)
}

/// Insert a new category at the end of the manual order, returning the
/// hydrated struct so the caller can push it straight into the in-memory
/// list. The sequence comes from the current maximum rather than the row
/// count, so a value freed by deleting a middle sibling is never handed out
/// again.
pub fn create_category(conn: &Connection, name: &str, color: &str) -> Result<Category, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::ConstraintViolation(
            "category name must not be empty".into(),
        ));
    }

    let now = Utc::now().timestamp_millis();
    conn.execute(
        "INSERT INTO categories (name, color, sequence, date_created)
         VALUES (?1, ?2, (SELECT COALESCE(MAX(sequence), 0) + 1 FROM categories), ?3)",
        params![name, color, now],
    )
    .map_err(map_constraint)?;

    let id = conn.last_insert_rowid();
    let sequence = conn.query_row(
        "SELECT sequence FROM categories WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;

    Ok(Category {
        id,
        name: name.to_string(),
        color: color.to_string(),
        sequence,
        date_created: now,
    })
}

/// Update the name and color for an existing category. We surface `NotFound`
/// when nothing was updated so the caller can show a friendly message instead
/// of silently continuing.
pub fn update_category(
    conn: &Connection,
    id: i64,
    name: &str,
    color: &str,
) -> Result<(), StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::ConstraintViolation(
            "category name must not be empty".into(),
        ));
    }

    let updated = conn
        .execute(
            "UPDATE categories SET name = ?1, color = ?2 WHERE id = ?3",
            params![name, color, id],
        )
        .map_err(map_constraint)?;

    if updated == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(())
    }
}

/// Remove a category row. The schema cascades to `items`, so the owned items
/// disappear with their parent. Remaining siblings are deliberately not
/// renumbered: reads sort by `(sequence, id)` regardless of gaps, and the
/// next `move_category` closes them.
pub fn delete_category(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let deleted = conn.execute("DELETE FROM categories WHERE id = ?1", params![id])?;

    if deleted == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(())
    }
}

/// Move the category at `from_index` to `to_index`, both 0-based positions in
/// the current ascending-sequence view, and renumber so sequences are exactly
/// `1..=N` afterwards.
///
/// Only rows whose sequence actually changes are written. When the sequences
/// were already dense that is just the bounded range between the two
/// positions; after deletions the same pass also closes the gaps. The whole
/// renumbering runs inside one transaction, so a failure mid-shift rolls back
/// and leaves every sequence at its pre-move value.
pub fn move_category(
    conn: &mut Connection,
    from_index: usize,
    to_index: usize,
) -> Result<(), StoreError> {
    let tx = conn.transaction()?;

    let rows: Vec<(i64, i64)> = {
        let mut stmt = tx.prepare("SELECT id, sequence FROM categories ORDER BY sequence, id")?;
        let mapped = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        mapped.collect::<Result<Vec<_>, _>>()?
    };

    if from_index >= rows.len() || to_index >= rows.len() {
        return Err(StoreError::NotFound);
    }
    if from_index == to_index {
        return Ok(());
    }

    let mut order: Vec<i64> = rows.iter().map(|&(id, _)| id).collect();
    let moved = order.remove(from_index);
    order.insert(to_index, moved);

    let stored: HashMap<i64, i64> = rows.into_iter().collect();
    {
        let mut update = tx.prepare("UPDATE categories SET sequence = ?1 WHERE id = ?2")?;
        for (position, id) in order.iter().enumerate() {
            let sequence = position as i64 + 1;
            if stored.get(id) != Some(&sequence) {
                update
                    .execute(params![sequence, *id])
                    .map_err(StoreError::TransactionAborted)?;
            }
        }
    }

    tx.commit().map_err(StoreError::TransactionAborted)?;
    log::debug!("moved category {moved} from index {from_index} to {to_index}");
    Ok(())
}
