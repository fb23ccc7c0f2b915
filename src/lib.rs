pub mod args;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod resources;
pub mod server;
pub mod tools;

pub use config::TransitConfig;
pub use error::{Result, TransitError};
pub use server::TransitServer;
