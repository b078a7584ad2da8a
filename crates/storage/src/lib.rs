pub mod context;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;

pub use context::RequestContext;
pub use database::{Backend, Database, PoolSettings};
pub use error::{Result, StorageError};
pub use store::StoreTx;
