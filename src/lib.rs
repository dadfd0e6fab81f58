//! Embedded persistence engine for a two-level to-do list: drag-orderable
//! categories that each own a set of completable items.
//!
//! The crate is pull-only: callers open a store handle, pass it explicitly to
//! the query functions, and re-render from the returned snapshots after every
//! mutation. There is no ambient global connection and no change
//! subscription. All calls are synchronous; transactional operations take the
//! connection by `&mut`, which is what serializes writers per store handle.
pub mod db;
pub mod error;
pub mod models;

/// The persistence layer. These functions are typically used by a front-end
/// to initialize the embedded SQLite store and run every list mutation.
pub use db::{
    create_category, create_item, delete_category, delete_item, ensure_schema, ensure_schema_at,
    fetch_categories, fetch_items, filter_items, move_category, open_in_memory, toggle_item,
    update_category, update_item,
};

/// The failure taxonomy every operation reports through.
pub use error::StoreError;

/// The two primary domain types that callers manipulate.
pub use models::{Category, Item};
