pub mod error;
pub mod net;
pub mod pce;
pub mod routing;
pub mod telemetry;
pub mod topo;

pub use error::{Error, Result, TelemetryError};

#[cfg(test)]
mod test;
