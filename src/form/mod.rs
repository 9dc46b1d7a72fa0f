pub mod payload;
pub mod validator;
pub mod value;
