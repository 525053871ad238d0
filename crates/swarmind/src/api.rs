pub mod client;
pub mod config;
pub mod memory;
pub mod transport;
