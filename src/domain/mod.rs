//! Domain layer: validated inputs for tasks and journal entries.
//!
//! Nothing here touches the store. Handlers convert request DTOs into
//! these types and reject anything that fails validation with a 400.

pub mod journal_entry;
pub mod task;

pub use journal_entry::{JournalEntryPatch, NewJournalEntry};
pub use task::{NewTask, Percentage};
