//! Domain layer: models, ports, and errors. No I/O lives here.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ConvergeError, ConvergeResult};
