pub mod demo;
pub mod history;
pub mod version;
