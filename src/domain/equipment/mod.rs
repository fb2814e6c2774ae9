//! Equipment catalog domain module.
//!
//! Items carry the stock counters that lending mutates; notes and
//! instructions are descriptive attachments that never affect stock.

mod errors;
mod instruction;
mod item;
mod note;
mod stock;

pub use errors::CatalogError;
pub use instruction::{Instruction, InstructionSummary, NewInstruction};
pub use item::{EquipmentItem, ItemProfile, NewItem, NewItemDraft, DEFAULT_STATUS};
pub use note::{EquipmentNote, NewNote};
pub use stock::{Stock, StockError};
