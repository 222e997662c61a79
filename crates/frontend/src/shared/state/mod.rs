pub mod autosave;
pub mod draft_store;
