pub mod commands;
pub mod dto;
pub mod error;
pub mod ports;
pub mod queries;
pub mod seed;
pub mod services;

pub use error::ApplicationResult;
