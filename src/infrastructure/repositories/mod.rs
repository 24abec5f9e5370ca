// src/infrastructure/repositories/mod.rs
mod error;
mod memory_article;
mod mysql_article;
mod postgres_article;

pub(crate) use error::map_sqlx;
pub use memory_article::InMemoryArticleRepository;
pub use mysql_article::MySqlArticleRepository;
pub use postgres_article::PostgresArticleRepository;
