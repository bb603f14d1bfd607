pub mod appointment_types;
pub mod colors;
