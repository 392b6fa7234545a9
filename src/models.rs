pub mod inventory;
pub mod auth;
pub mod dashboard;
pub mod import;
pub mod search;
pub mod assistant;
