//! Durability checks against an on-disk store: the manual order and
//! completion flags must survive closing and reopening the database.

use anyhow::Result;
use tempfile::TempDir;
use todo_store::{
    create_category, create_item, ensure_schema_at, fetch_categories, fetch_items, move_category,
    toggle_item,
};

#[test]
fn order_and_flags_survive_a_reopen() -> Result<()> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("todos.sqlite");

    let item_id;
    {
        let mut conn = ensure_schema_at(&db_path)?;
        create_category(&conn, "Home", "#5AC8FA")?;
        create_category(&conn, "Work", "#FF9500")?;
        let errands = create_category(&conn, "Errands", "#FF2D55")?;

        let item = create_item(&conn, errands.id, "Post parcel")?;
        toggle_item(&conn, item.id)?;
        item_id = item.id;

        // Drag "Errands" to the top before closing.
        move_category(&mut conn, 2, 0)?;
    }

    let conn = ensure_schema_at(&db_path)?;
    let names: Vec<String> = fetch_categories(&conn)?
        .into_iter()
        .map(|category| category.name)
        .collect();
    assert_eq!(names, vec!["Errands", "Home", "Work"]);

    let categories = fetch_categories(&conn)?;
    let items = fetch_items(&conn, categories[0].id)?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, item_id);
    assert!(items[0].done, "completion flag must persist");
    Ok(())
}

#[test]
fn schema_migrations_are_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("todos.sqlite");

    {
        let conn = ensure_schema_at(&db_path)?;
        create_category(&conn, "Only", "#5AC8FA")?;
    }

    // A second open must re-run the migrations without clobbering data.
    let conn = ensure_schema_at(&db_path)?;
    assert_eq!(fetch_categories(&conn)?.len(), 1);
    Ok(())
}
