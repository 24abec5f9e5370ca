// src/presentation/http/middleware/mod.rs
pub mod auth;
pub mod cache;
