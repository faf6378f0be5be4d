pub mod config;
pub mod model;
pub mod service;

pub use config::PlatformConfig;
pub use service::{Error, PlatformClient};
