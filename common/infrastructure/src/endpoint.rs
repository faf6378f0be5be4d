use std::fmt::Debug;

/// A well-known endpoint of the system, with its default port.
pub trait Endpoint: Debug + Send + Sync + 'static {
    const PORT: u16;
    const PATH: &'static str;

    fn port() -> u16 {
        Self::PORT
    }

    fn path() -> &'static str {
        Self::PATH
    }
}

/// The main API endpoint.
#[derive(Clone, Debug)]
pub struct Vocero;

impl Endpoint for Vocero {
    const PORT: u16 = 8080;
    const PATH: &'static str = "/";
}
