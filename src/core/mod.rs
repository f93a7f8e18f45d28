pub mod aggregate;
pub mod billing;
pub mod config;
pub mod formatter;
pub mod models;
pub mod stats;
pub mod window;
