//! Configurable form engine for the visitor-memory pages.
//!
//! A JSON field configuration describes, per page, which form to bind and
//! how each input is read and validated. [`engine::controller::FormEngine`]
//! binds to a page through the [`dom::document`] traits, validates on submit
//! and hands the payload to a [`store::document_store::DocumentStore`].

pub mod cli;
pub mod config;
pub mod dom;
pub mod engine;
pub mod form;
pub mod locale;
pub mod page;
pub mod store;
pub mod trace;
