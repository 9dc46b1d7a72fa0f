pub mod controller;
pub mod error;
pub mod feedback;
