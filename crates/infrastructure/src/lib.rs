pub mod database;
pub mod notifications;

pub use database::{init_database, run_migrations};
pub use notifications::{LogNotifier, Notifier, OutgoingEmail};
pub use sea_orm::DatabaseConnection;
