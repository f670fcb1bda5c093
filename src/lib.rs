pub mod config;
pub mod discovery;
pub mod error;
pub mod github;
pub mod http;
pub mod joke;
pub mod logging;
pub mod pipeline;
pub mod runner;
pub mod types;

pub type Result<T, E = error::Error> = std::result::Result<T, E>;
