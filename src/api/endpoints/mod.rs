pub mod analysis;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod records;
pub mod reminders;
pub mod share;
pub mod timeline;
pub mod upload;
