pub mod auth;
pub mod inventory;
pub mod dashboard;
pub mod import;
pub mod reports;
pub mod search;
pub mod assistant;
