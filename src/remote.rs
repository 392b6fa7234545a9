pub mod client;
pub use client::RemoteClient;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod auth_repo;
pub use auth_repo::AuthRepository;
pub mod chat_repo;
pub use chat_repo::ChatRepository;
