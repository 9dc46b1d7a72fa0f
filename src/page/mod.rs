pub mod context;
pub mod resolver;
