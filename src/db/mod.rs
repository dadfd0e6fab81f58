//! Persistence module split across logical submodules.

mod categories;
mod connection;
mod items;

pub use categories::{
    create_category, delete_category, fetch_categories, move_category, update_category,
};
pub use connection::{ensure_schema, ensure_schema_at, open_in_memory};
pub use items::{create_item, delete_item, fetch_items, filter_items, toggle_item, update_item};
