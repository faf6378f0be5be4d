mod permission;
pub use permission::*;

pub mod auth;
pub mod authenticator;
pub mod authorizer;
pub mod default;
pub mod devmode;
