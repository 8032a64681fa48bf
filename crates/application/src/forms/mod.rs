pub mod dtos;
pub mod fields;
pub mod public;
pub mod use_cases;
