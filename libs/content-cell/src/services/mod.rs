pub mod catalog;
pub mod showcase;
