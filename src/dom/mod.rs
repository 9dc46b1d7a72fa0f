pub mod document;
pub mod selector;
pub mod static_form;
