pub mod auth;
pub mod empresas;
pub mod error;
pub mod forms;
pub mod grupos;
pub mod users;
pub mod validation;
pub mod visitantes;

pub use error::{AppError, AppResult, ErrorResponse};
