pub mod field_model;
pub mod lint;
pub mod loader;
