// src/presentation/http/controllers/mod.rs
pub mod articles;
pub mod pages;
pub mod session;
pub mod tags;
