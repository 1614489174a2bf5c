pub mod admin;
pub mod ajax;
pub mod assets;
pub mod form;
