pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, StopTuning};
pub use error::ConfigError;
pub use types::{OpResult, ServiceDef, ServiceState, ServiceStatus};
