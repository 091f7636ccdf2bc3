pub mod browser;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod logger;
pub mod pipeline;
