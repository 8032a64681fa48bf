pub mod dtos;
pub mod use_cases;

pub use use_cases::{decode_token, AuthConfig};
