pub mod clash;
pub mod config;
pub mod error;
pub mod math;
pub mod operations;
pub mod topology;

pub use clash::{ClashDetector, ClashReport, ClashSet, Element, ElementId, Method, Model};
pub use config::{ClashConfig, ConfigError};
pub use error::{ClashError, GeoclashError, Result, SelectionError};
