//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! PostgreSQL (SeaORM) and in-memory repositories, JWT tokens, Argon2
//! password hashing, and filesystem media storage.

pub mod auth;
pub mod database;
pub mod media;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, InMemoryCategoryRepository, InMemoryPostRepository, InMemoryStore,
    InMemoryUserRepository, PostgresCategoryRepository, PostgresPostRepository,
    PostgresUserRepository, connect,
};
pub use media::FsMediaStore;
