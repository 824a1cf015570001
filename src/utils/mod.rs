pub mod file;
pub mod parsing;
