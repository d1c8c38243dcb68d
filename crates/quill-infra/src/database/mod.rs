//! Storage adapters: PostgreSQL via SeaORM, plus the in-memory fallback.

mod connections;
pub mod entity;
mod memory;
mod postgres_base;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use memory::{
    InMemoryCategoryRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
};
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
