pub mod auth;
pub mod dashboard;
pub mod empresas;
pub mod error_handler;
pub mod forms;
pub mod grupos;
pub mod health;
pub mod public_forms;
pub mod users;
pub mod visitantes;
