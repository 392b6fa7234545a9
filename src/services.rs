pub mod session_store;
pub mod auth;
pub mod inventory_service;
pub mod issue_slip;
pub mod dashboard_service;
pub mod csv_import_service;
pub mod report_service;
pub mod search_service;
pub mod assistant_service;
