pub mod api;
pub mod errors;
pub mod models;
pub mod utils;

pub use api::client::ApiClient;
pub use api::config::ApiConfig;
pub use errors::{SwarmindError, SwarmindResult};
