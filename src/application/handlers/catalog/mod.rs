//! Catalog handlers: items, notes, and instructions.

mod add_item;
mod attachments;
mod browse_items;
mod set_item_image;

pub use add_item::{AddItemCommand, AddItemHandler};
pub use attachments::AttachmentsHandler;
pub use browse_items::{GetItemHandler, ListItemsHandler};
pub use set_item_image::{SetItemImageCommand, SetItemImageHandler};
