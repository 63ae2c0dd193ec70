//! Request handlers.

pub mod health;
pub mod insights;
pub mod integrations;
pub mod live;
pub mod meetings;
pub mod search;
pub mod upload;
