pub mod document_store;
pub mod firestore;
pub mod memory;
