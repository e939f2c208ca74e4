pub mod treatment;
