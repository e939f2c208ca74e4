pub mod clinic;
pub mod doctor;
