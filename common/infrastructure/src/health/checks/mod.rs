mod local;
mod probe;

pub use local::*;
pub use probe::*;
