pub mod audit;
pub mod database;
pub mod notification;

pub use audit::AuditClient;
pub use database::DatabaseClient;
pub use notification::NotificationClient;
