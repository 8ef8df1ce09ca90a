//! State module - session transcript persistence

pub mod store;

pub use store::{FileStateStore, NullStateStore, SessionRecord, StateStore};
